// File: crates/popularity-core/build.rs
// Summary: Links the Windows system libraries Skia needs for the raster chart host.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager reads the registry (RegOpenKeyExW, RegQueryInfoKeyW).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
