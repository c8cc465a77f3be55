//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generate Kotlin bindings for the Android app:
//! ```bash
//! cargo run --features uniffi-cli --bin uniffi-bindgen generate --library target/release/libbaking_time.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
