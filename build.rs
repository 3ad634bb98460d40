// build.rs -- Locate libonig, detect its version, and select the matching
// compatibility-layer implementation via cfg flags.
//
// The C API surface changed across releases: onig_initialize() appeared in
// 6.0.0, the retry-limit tunables became usable in 6.8.2, and the
// retry-limit error code only exists where those tunables do. The flags
// emitted here gate the corresponding declarations in src/ffi.rs and the
// two implementations in src/compat.rs, so the selection happens once at
// build time with no runtime branching.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(onig_explicit_init)");
    println!("cargo:rustc-check-cfg=cfg(onig_retry_limit)");
    println!("cargo:rustc-check-cfg=cfg(onig_retry_limit_error)");
    println!("cargo:rerun-if-env-changed=RIGONI_ONIG_DIR");
    println!("cargo:rerun-if-env-changed=RIGONI_ONIG_VERSION");
    println!("cargo:rerun-if-env-changed=RIGONI_STATIC");

    #[cfg(feature = "vendored")]
    {
        build_vendored();
        emit_version_cfgs(VENDORED_VERSION, true);
    }

    #[cfg(not(feature = "vendored"))]
    link_system();
}

#[cfg(not(feature = "vendored"))]
fn link_system() {
    let onig_dir = env::var("RIGONI_ONIG_DIR").ok().map(PathBuf::from);
    if let Some(dir) = &onig_dir {
        println!("cargo:rustc-link-search=native={}", dir.join("lib").display());
    }
    let kind = if env::var("RIGONI_STATIC").is_ok() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={}=onig", kind);

    let header = find_header(onig_dir.as_deref()).and_then(|p| fs::read_to_string(p).ok());

    let version = env::var("RIGONI_ONIG_VERSION")
        .ok()
        .and_then(|v| parse_dotted(&v))
        .or_else(|| header.as_deref().and_then(parse_header_version))
        .unwrap_or_else(|| {
            println!("cargo:warning=could not detect the Oniguruma version; assuming 6.9.4 (set RIGONI_ONIG_VERSION to override)");
            (6, 9, 4)
        });

    // The retry-limit error code has no version macro of its own; probe
    // the header for the constant's name, like a #ifdef would.
    let has_retry_error = header
        .as_deref()
        .map(|h| h.contains("ONIGERR_RETRY_LIMIT_IN_MATCH_OVER"))
        .unwrap_or(version >= (6, 8, 2));

    emit_version_cfgs(version, has_retry_error);
}

fn emit_version_cfgs(version: (u32, u32, u32), has_retry_error: bool) {
    if version.0 >= 6 {
        println!("cargo:rustc-cfg=onig_explicit_init");
    }
    if version >= (6, 8, 2) {
        println!("cargo:rustc-cfg=onig_retry_limit");
    }
    if has_retry_error {
        println!("cargo:rustc-cfg=onig_retry_limit_error");
    }
}

#[cfg(not(feature = "vendored"))]
fn find_header(onig_dir: Option<&std::path::Path>) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = onig_dir {
        candidates.push(dir.join("include").join("oniguruma.h"));
    }
    candidates.push(PathBuf::from("/usr/local/include/oniguruma.h"));
    candidates.push(PathBuf::from("/usr/include/oniguruma.h"));
    candidates.into_iter().find(|p| p.is_file())
}

#[cfg(not(feature = "vendored"))]
fn parse_dotted(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.trim().splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let teeny = parts.next().unwrap_or("0").parse().ok()?;
    Some((major, minor, teeny))
}

#[cfg(not(feature = "vendored"))]
fn parse_header_version(header: &str) -> Option<(u32, u32, u32)> {
    let field = |name: &str| -> Option<u32> {
        header.lines().find_map(|line| {
            let rest = line.trim().strip_prefix("#define")?.trim_start();
            let value = rest.strip_prefix(name)?.trim();
            value.split_whitespace().next()?.parse().ok()
        })
    };
    Some((
        field("ONIGURUMA_VERSION_MAJOR")?,
        field("ONIGURUMA_VERSION_MINOR")?,
        field("ONIGURUMA_VERSION_TEENY")?,
    ))
}

// --- vendored build (oniguruma-src/ git submodule) ---

#[cfg(feature = "vendored")]
const VENDORED_VERSION: (u32, u32, u32) = (6, 9, 4);

#[cfg(feature = "vendored")]
fn build_vendored() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let src_dir = PathBuf::from("oniguruma-src/src");

    // Generate config.h
    let pointer_size = env::var("CARGO_CFG_TARGET_POINTER_WIDTH")
        .unwrap()
        .parse::<usize>()
        .unwrap()
        / 8;

    let config_h = format!(
        r#"
#ifndef CONFIG_H
#define CONFIG_H

#define HAVE_STDINT_H 1
#define HAVE_INTTYPES_H 1
#define HAVE_STDLIB_H 1
#define HAVE_STRING_H 1
#define HAVE_SYS_TYPES_H 1
#define HAVE_SYS_STAT_H 1
#define HAVE_UNISTD_H 1
#define HAVE_MEMORY_H 1
#define HAVE_STRINGS_H 1
#define STDC_HEADERS 1

#define SIZEOF_INT 4
#define SIZEOF_LONG {long_size}
#define SIZEOF_LONG_LONG 8
#define SIZEOF_VOIDP {pointer_size}

#define PACKAGE "onig"
#define PACKAGE_VERSION "6.9.4"
#define VERSION "6.9.4"

#endif
"#,
        long_size = if cfg!(target_os = "windows") {
            4
        } else {
            pointer_size
        },
        pointer_size = pointer_size,
    );
    fs::write(out_dir.join("config.h"), config_h).unwrap();

    // C source files (matches the upstream CMakeLists.txt).
    // Note: the unicode_*_data.c files are #include'd by unicode.c and
    // must NOT be compiled as separate translation units.
    let c_sources = [
        "regerror.c",
        "regparse.c",
        "regext.c",
        "regcomp.c",
        "regexec.c",
        "reggnu.c",
        "regenc.c",
        "regsyntax.c",
        "regtrav.c",
        "regversion.c",
        "st.c",
        "onig_init.c",
        "unicode.c",
        "ascii.c",
        "utf8.c",
        "utf16_be.c",
        "utf16_le.c",
        "utf32_be.c",
        "utf32_le.c",
        "euc_jp.c",
        "sjis.c",
        "iso8859_1.c",
        "iso8859_2.c",
        "iso8859_3.c",
        "iso8859_4.c",
        "iso8859_5.c",
        "iso8859_6.c",
        "iso8859_7.c",
        "iso8859_8.c",
        "iso8859_9.c",
        "iso8859_10.c",
        "iso8859_11.c",
        "iso8859_13.c",
        "iso8859_14.c",
        "iso8859_15.c",
        "iso8859_16.c",
        "euc_tw.c",
        "euc_kr.c",
        "big5.c",
        "gb18030.c",
        "koi8_r.c",
        "cp1251.c",
        "euc_jp_prop.c",
        "sjis_prop.c",
        "unicode_unfold_key.c",
        "unicode_fold1_key.c",
        "unicode_fold2_key.c",
        "unicode_fold3_key.c",
    ];

    let mut build = cc::Build::new();
    build
        .opt_level(3)
        .include(&src_dir)
        .include(&out_dir) // for config.h
        .define("HAVE_CONFIG_H", None)
        .define("ONIG_STATIC", None)
        .define("ONIG_EXTERN", Some("extern"));

    for file in &c_sources {
        build.file(src_dir.join(file));
    }

    build.compile("onig");
}
