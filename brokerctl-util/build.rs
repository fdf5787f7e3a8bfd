//! Compile time configurations for the util crate
fn main() {
    // the BROKERCTL_PKG_NAME variable is used to locate the config folder under
    // `~/.config`. Changing it means previously written environment tables are
    // no longer found.
    println!("cargo::rustc-env=BROKERCTL_PKG_NAME=brokerctl");
}
