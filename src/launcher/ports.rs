//! Free host port selection by bind probing.

use std::net::TcpListener;

/// Find the first free port at or above `base_port`.
///
/// Each candidate is probed by binding `0.0.0.0:<port>`; the listener is
/// dropped immediately so the port is released before the container
/// publishes it. The scan has no upper bound — on a saturated range it
/// keeps climbing until the user interrupts.
#[must_use]
pub fn find_free_port(base_port: u16) -> u16 {
    let mut port = base_port;
    while port_in_use(port) {
        port = port.wrapping_add(1);
    }
    port
}

/// Whether a local bind of the port fails.
fn port_in_use(port: u16) -> bool {
    TcpListener::bind(("0.0.0.0", port)).is_err()
}
