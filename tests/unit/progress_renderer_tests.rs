use insighter_launcher::launcher::image::ProgressRenderer;
use insighter_launcher::runtime::PullProgress;

fn layer(id: &str, status: &str, progress: &str) -> PullProgress {
    PullProgress {
        layer_id: Some(id.into()),
        status: status.into(),
        progress: progress.into(),
        error: None,
    }
}

#[test]
fn first_message_for_a_layer_prints_a_plain_line() {
    let mut renderer = ProgressRenderer::new();
    let mut out = Vec::new();

    renderer
        .render(&layer("aaa111", "Downloading", "[=> ]"), &mut out)
        .expect("render");

    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "Layer aaa111: Downloading [=> ]\n"
    );
}

#[test]
fn update_repositions_the_cursor_to_the_layer_line() {
    let mut renderer = ProgressRenderer::new();
    let mut out = Vec::new();

    renderer
        .render(&layer("aaa111", "Downloading", ""), &mut out)
        .expect("render");
    renderer
        .render(&layer("bbb222", "Downloading", ""), &mut out)
        .expect("render");
    out.clear();

    // Updating the first of two layers moves up two lines, clears,
    // rewrites, and moves back down two lines.
    renderer
        .render(&layer("aaa111", "Extracting", "[==>]"), &mut out)
        .expect("render");

    let rendered = String::from_utf8(out).expect("utf8");
    assert_eq!(
        rendered,
        "\x1b[2A\x1b[KLayer aaa111: Extracting [==>]\n\x1b[2B"
    );
}

#[test]
fn update_to_the_bottom_layer_moves_one_line() {
    let mut renderer = ProgressRenderer::new();
    let mut out = Vec::new();

    renderer
        .render(&layer("aaa111", "Downloading", ""), &mut out)
        .expect("render");
    renderer
        .render(&layer("bbb222", "Downloading", ""), &mut out)
        .expect("render");
    out.clear();

    renderer
        .render(&layer("bbb222", "Pull complete", ""), &mut out)
        .expect("render");

    let rendered = String::from_utf8(out).expect("utf8");
    assert!(rendered.starts_with("\x1b[1A\x1b[K"));
    assert!(rendered.ends_with("\x1b[1B"));
}

#[test]
fn whole_image_status_lines_are_ignored() {
    let mut renderer = ProgressRenderer::new();
    let mut out = Vec::new();

    let message = PullProgress {
        layer_id: None,
        status: "Status: Downloaded newer image".into(),
        progress: String::new(),
        error: None,
    };
    renderer.render(&message, &mut out).expect("render");

    assert!(out.is_empty());
}
