fn main() {
    // Linker setup for the Node addon build; plain Rust builds skip it.
    if std::env::var("CARGO_FEATURE_NAPI").is_ok() {
        napi_build::setup();
    }
}
