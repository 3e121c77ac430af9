use std::net::TcpListener;

use insighter_launcher::launcher::ports::find_free_port;

fn grab_free_port() -> u16 {
    let listener = TcpListener::bind(("0.0.0.0", 0)).expect("bind ephemeral");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

#[test]
fn returns_base_port_when_free() {
    let base = grab_free_port();
    assert_eq!(find_free_port(base), base);
}

#[test]
fn skips_an_occupied_base_port() {
    let listener = TcpListener::bind(("0.0.0.0", 0)).expect("bind ephemeral");
    let base = listener.local_addr().expect("local addr").port();

    let selected = find_free_port(base);

    assert!(selected > base, "selected {selected}, base {base}");
    // Property: the selected port really is bindable.
    TcpListener::bind(("0.0.0.0", selected)).expect("selected port binds");
}

#[test]
fn skips_a_run_of_occupied_ports() {
    // Occupy two adjacent ports and verify the scan climbs past both.
    let first = TcpListener::bind(("0.0.0.0", 0)).expect("bind ephemeral");
    let base = first.local_addr().expect("local addr").port();
    let second = TcpListener::bind(("0.0.0.0", base + 1));

    let selected = find_free_port(base);

    assert!(selected > base);
    if second.is_ok() {
        assert!(selected > base + 1);
    }
    TcpListener::bind(("0.0.0.0", selected)).expect("selected port binds");
}
