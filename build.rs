fn main() {
    // Stamp for `badgekit --version` diagnostics and BUILD_DATE
    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%MZ");
    println!("cargo:rustc-env=BUILD_DATE={stamp}");
    println!("cargo:rerun-if-changed=build.rs");
}
