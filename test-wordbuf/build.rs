use std::{env, path::PathBuf};

// Stand-ins for allocator macros an instrumented build would already carry.
// None of these symbols exist, so the link fails unless the header drops them.
const PREDEFINED: [(&str, &str); 4] = [
    ("malloc", "sanitizer_malloc"),
    ("calloc", "sanitizer_calloc"),
    ("realloc", "sanitizer_realloc"),
    ("free", "sanitizer_free"),
];

fn main() {
    let manifest = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("set by cargo"));
    let include = manifest.join("../include");
    let header = include.join("alloc_hooks.h");

    let mut build = cc::Build::new();
    build.file("csrc/wordbuf.c").include(&include);
    for (name, replacement) in PREDEFINED {
        build.define(name, replacement);
    }
    if build.get_compiler().is_like_msvc() {
        build.flag(&format!("/FI{}", header.display()));
    } else {
        build.flag("-include").flag(header.to_str().expect("utf-8 path"));
    }
    build.compile("wordbuf");

    println!("cargo:rerun-if-changed=csrc/wordbuf.c");
    println!("cargo:rerun-if-changed={}", header.display());
}
