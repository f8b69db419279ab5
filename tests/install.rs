//! End-to-end install pipeline against a mock GitHub.

mod common;

use common::*;
use gh_release_plugins::install::copy_tree;
use gh_release_plugins::plugin::prefix_v;
use gh_release_plugins::template::archive_stem;
use gh_release_plugins::{Checksum, ChecksumStage, Error, FormatContext, Plugin, Template};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// `tool-<version>-<platform>-<arch>.tar.gz` with the binary at its root.
fn tarball_plugin() -> Plugin {
    Plugin::new("tool", REPO)
        .filename("tool-{normalize_version}-{platform}-{arch}.tar.gz")
        .checksum_file("checksums.txt")
        .bin_path("tool")
        .recover_raw_version(prefix_v)
}

const TARBALL: &str = "tool-1.0.0-linux-x86_64.tar.gz";

async fn serve_tarball(fx: &Fixture, checksum: Option<String>) -> Vec<u8> {
    let archive = tar_gz(&[("tool", BINARY), ("README.md", b"readme")]);
    let expected = checksum.unwrap_or_else(|| sha256_hex(&archive));
    fx.asset(TARBALL, archive.clone()).await;
    fx.asset(
        "checksums.txt",
        format!("{}  other-asset.zip\n{}  {}\n", "0".repeat(64), expected, TARBALL).into_bytes(),
    )
    .await;
    archive
}

#[tokio::test]
async fn test_install_tarball_with_checksum_file() {
    let fx = Fixture::start().await;
    serve_tarball(&fx, None).await;

    fx.installer(vec![tarball_plugin()])
        .install("tool", VERSION, &fx.root())
        .unwrap();

    let installed = fx.root().join("bin/tool");
    assert_eq!(std::fs::read(&installed).unwrap(), BINARY);
    #[cfg(unix)]
    assert_eq!(mode(&installed), 0o755);
    assert!(!fx.root().join("README.md").exists());
    assert!(fx.scratch_is_clean());
}

#[tokio::test]
async fn test_install_twice_is_idempotent() {
    let fx = Fixture::start().await;
    serve_tarball(&fx, None).await;
    let installer = fx.installer(vec![tarball_plugin()]);

    installer.install("tool", VERSION, &fx.root()).unwrap();
    let first = std::fs::read(fx.root().join("bin/tool")).unwrap();
    installer.install("tool", VERSION, &fx.root()).unwrap();
    let second = std::fs::read(fx.root().join("bin/tool")).unwrap();

    assert_eq!(first, second);
    assert!(fx.scratch_is_clean());
}

#[tokio::test]
async fn test_checksum_mismatch_leaves_root_untouched() {
    let fx = Fixture::start().await;
    serve_tarball(&fx, Some("f".repeat(64))).await;

    let err = fx
        .installer(vec![tarball_plugin()])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();

    assert!(matches!(err, Error::ChecksumMismatch { .. }), "got {err:?}");
    assert!(!fx.root().exists());
    assert!(fx.scratch_is_clean());
}

#[tokio::test]
async fn test_checksum_file_without_entry() {
    let fx = Fixture::start().await;
    fx.asset(TARBALL, tar_gz(&[("tool", BINARY)])).await;
    fx.asset(
        "checksums.txt",
        b"aaaa  one.tar.gz\nbbbb  two.tar.gz\n".to_vec(),
    )
    .await;

    let err = fx
        .installer(vec![tarball_plugin()])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::ChecksumNotFound { .. }), "got {err:?}");
    assert!(!fx.root().exists());
}

#[tokio::test]
async fn test_raw_binary_with_bare_hash_sidecar() {
    let fx = Fixture::start().await;
    let plugin = Plugin::new("tool", REPO)
        .filename("tool-{platform}-{arch}")
        .checksum_file("{filename}.sha256")
        .bin_path("tool")
        .uncompressed()
        .recover_raw_version(prefix_v);

    fx.asset("tool-linux-x86_64", BINARY.to_vec()).await;
    fx.asset(
        "tool-linux-x86_64.sha256",
        format!("{}\n", sha256_hex(BINARY)).into_bytes(),
    )
    .await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
}

#[tokio::test]
async fn test_extract_stage_checks_unpacked_binary() {
    let fx = Fixture::start().await;
    let plugin = tarball_plugin()
        .checksum_file("tool-{arch}.sha256sum")
        .checksum_stage(ChecksumStage::Extract);

    fx.asset(TARBALL, tar_gz(&[("tool", BINARY)])).await;
    fx.asset(
        "tool-x86_64.sha256sum",
        format!("{}  tool\n", sha256_hex(BINARY)).into_bytes(),
    )
    .await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
}

#[tokio::test]
async fn test_extract_stage_mismatch_after_unpacking() {
    let fx = Fixture::start().await;
    let plugin = tarball_plugin()
        .checksum_file("tool.sha256sum")
        .checksum_stage(ChecksumStage::Extract);

    let archive = tar_gz(&[("tool", BINARY)]);
    // A sum over the archive does not match the unpacked binary.
    fx.asset("tool.sha256sum", format!("{}  tool\n", sha256_hex(&archive)).into_bytes())
        .await;
    fx.asset(TARBALL, archive).await;

    let err = fx
        .installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::ChecksumMismatch { .. }), "got {err:?}");
    assert!(!fx.root().exists());
    assert!(fx.scratch_is_clean());
}

#[tokio::test]
async fn test_github_api_digest() {
    let fx = Fixture::start().await;
    let plugin = tarball_plugin().checksum(Checksum::GithubApi);
    let archive = tar_gz(&[("tool", BINARY)]);

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases/tags/{}", REPO, TAG)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tag_name": TAG,
            "assets": [
                { "name": "checksums.txt", "digest": null },
                { "name": TARBALL, "digest": format!("sha256:{}", sha256_hex(&archive)) }
            ]
        })))
        .expect(1)
        .mount(&fx.server)
        .await;
    fx.asset(TARBALL, archive).await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
}

#[tokio::test]
async fn test_github_api_without_matching_asset() {
    let fx = Fixture::start().await;
    let plugin = tarball_plugin().checksum(Checksum::GithubApi);

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases/tags/{}", REPO, TAG)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tag_name": TAG,
            "assets": []
        })))
        .mount(&fx.server)
        .await;
    fx.asset(TARBALL, tar_gz(&[("tool", BINARY)])).await;

    let err = fx
        .installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::DigestNotFound { .. }), "got {err:?}");
    assert!(!fx.root().exists());
}

#[tokio::test]
async fn test_direct_digest() {
    let fx = Fixture::start().await;
    let archive = tar_gz(&[("tool", BINARY)]);
    let plugin = tarball_plugin().checksum(Checksum::Digest(Template::from(sha256_hex(&archive))));
    fx.asset(TARBALL, archive).await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert!(fx.root().join("bin/tool").is_file());
}

#[tokio::test]
async fn test_single_gz_stream() {
    let fx = Fixture::start().await;
    let plugin = Plugin::new("tool", REPO)
        .filename("tool-{arch}-{platform}.gz")
        .platform_map(&[("linux", "unknown-linux-gnu")])
        .bin_path("tool")
        .recover_raw_version(prefix_v);
    fx.asset("tool-x86_64-unknown-linux-gnu.gz", gz(BINARY)).await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
}

#[tokio::test]
async fn test_zip_with_nested_binary_and_renamed_command() {
    fn bin(ctx: &FormatContext) -> String {
        format!("{}/bin/tool", archive_stem(&ctx.filename))
    }

    let fx = Fixture::start().await;
    let plugin = Plugin::new("tool", REPO)
        .cmd("t")
        .filename("tool-{platform}.zip")
        .platform_map(&[("linux", "Linux")])
        .bin_path(Template::Computed(bin))
        .recover_raw_version(prefix_v);
    fx.asset("tool-Linux.zip", zip(&[("tool-Linux/bin/tool", BINARY)])).await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/t")).unwrap(), BINARY);
}

#[tokio::test]
async fn test_full_url_filename_bypasses_release_page() {
    let fx = Fixture::start().await;
    let filename = format!("{}/mirror/{{version}}/tool.tar.gz", fx.server.uri());
    let plugin = Plugin::new("tool", REPO)
        .filename(filename)
        .bin_path("tool")
        .recover_raw_version(prefix_v);
    fx.serve(&format!("/mirror/{}/tool.tar.gz", TAG), tar_gz(&[("tool", BINARY)]))
        .await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
}

#[tokio::test]
async fn test_missing_binary() {
    let fx = Fixture::start().await;
    let plugin = tarball_plugin().bin_path("nested/tool");
    serve_tarball(&fx, None).await;

    let err = fx
        .installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::BinaryNotFound(_)), "got {err:?}");
    assert!(!fx.root().join("bin").exists());
    assert!(fx.scratch_is_clean());
}

#[tokio::test]
async fn test_custom_placement_copies_tree() {
    fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, ctx: &FormatContext) -> gh_release_plugins::Result<()> {
        copy_tree(&extract_root.join(archive_stem(&ctx.filename)), root)?;
        gh_release_plugins::install::mark_executable(&root.join("bin").join(&plugin.cmd))
    }

    let fx = Fixture::start().await;
    let plugin = Plugin::new("tool", REPO)
        .filename("tool-{platform}.tar.gz")
        .bin_path("tool-linux/bin/tool")
        .recover_raw_version(prefix_v)
        .custom_copy(copy);
    fx.asset(
        "tool-linux.tar.gz",
        tar_gz(&[
            ("tool-linux/bin/tool", BINARY),
            ("tool-linux/share/tool/runtime.txt", b"runtime"),
        ]),
    )
    .await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
    assert_eq!(
        std::fs::read(fx.root().join("share/tool/runtime.txt")).unwrap(),
        b"runtime"
    );
}

#[tokio::test]
async fn test_custom_placement_failure_is_placement_error() {
    fn copy(_: &Plugin, extract_root: &Path, root: &Path, _: &FormatContext) -> gh_release_plugins::Result<()> {
        let src = extract_root.join("tool");
        std::fs::copy(&src, root.join("no/such/dir/tool"))?;
        Ok(())
    }

    let fx = Fixture::start().await;
    serve_tarball(&fx, None).await;
    let plugin = tarball_plugin().custom_copy(copy);

    let err = fx
        .installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::Placement { ref plugin, .. } if plugin == "tool"), "got {err:?}");
}

#[tokio::test]
async fn test_custom_checker_receives_companion() {
    fn checker(
        _: &gh_release_plugins::Installer,
        artifact: &Path,
        companion: &Path,
        ctx: &FormatContext,
    ) -> gh_release_plugins::Result<()> {
        assert_eq!(artifact.file_name().unwrap(), TARBALL);
        assert_eq!(std::fs::read(companion).unwrap(), b"signed");
        assert_eq!(ctx.checksum_filename, format!("{}.sig", TARBALL));
        Ok(())
    }

    let fx = Fixture::start().await;
    let plugin = tarball_plugin().checksum(Checksum::Custom {
        file: "{filename}.sig".into(),
        checker,
    });
    fx.asset(TARBALL, tar_gz(&[("tool", BINARY)])).await;
    fx.asset(&format!("{}.sig", TARBALL), b"signed".to_vec()).await;

    fx.installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap();
    assert!(fx.root().join("bin/tool").is_file());
}

#[tokio::test]
async fn test_download_failure() {
    let fx = Fixture::start().await;

    let err = fx
        .installer(vec![tarball_plugin()])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::Download { .. }), "got {err:?}");
    assert!(!fx.root().exists());
    assert!(fx.scratch_is_clean());
}

#[tokio::test]
async fn test_unsupported_archive_type() {
    let fx = Fixture::start().await;
    let plugin = tarball_plugin()
        .filename("tool.tar.bz2")
        .checksum(Checksum::None);
    fx.asset("tool.tar.bz2", b"BZh9".to_vec()).await;

    let err = fx
        .installer(vec![plugin])
        .install("tool", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedArchiveType(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unknown_plugin() {
    let fx = Fixture::start().await;
    let err = fx
        .installer(vec![])
        .install("nope", VERSION, &fx.root())
        .unwrap_err();
    assert!(matches!(err, Error::PluginNotFound(ref n) if n == "nope"));
}

/// A minisign stand-in that accepts only `GOODKEY`.
#[cfg(unix)]
const FAKE_MINISIGN: &[u8] = b"#!/bin/sh\n[ \"$1\" = \"-P\" ] && [ \"$2\" = \"GOODKEY\" ] && exit 0\necho bad >&2\nexit 1\n";

#[cfg(unix)]
const SIGNED: &str = "tool-linux-x86_64.tar.gz";

/// Fixture whose only source of minisign is the bootstrap release.
#[cfg(unix)]
async fn signed_fixture(public_key: &'static str) -> (Fixture, Vec<Plugin>) {
    use gh_release_plugins::verify::minisign::{MINISIGN_CMD, MINISIGN_VERSION};

    let fx = Fixture::start().await;
    fx.asset(SIGNED, tar_gz(&[("tool", BINARY)])).await;
    fx.asset(&format!("{SIGNED}.minisig"), b"untrusted comment: sig".to_vec())
        .await;
    fx.serve(
        &format!(
            "/fake/minisign/releases/download/{}/minisign-linux-x86_64",
            MINISIGN_VERSION
        ),
        FAKE_MINISIGN.to_vec(),
    )
    .await;

    let minisign = Plugin::new(MINISIGN_CMD, "fake/minisign")
        .filename("minisign-{platform}-{arch}")
        .uncompressed();
    let tool = Plugin::new("tool", REPO)
        .filename("tool-{platform}-{arch}.tar.gz")
        .checksum(Checksum::Minisign {
            signature: Template::from("{filename}.minisig"),
            public_key,
        })
        .recover_raw_version(prefix_v);
    (fx, vec![minisign, tool])
}

#[cfg(unix)]
#[tokio::test]
async fn test_minisign_bootstrap_accepts_good_signature() {
    if which::which("minisign").is_ok() {
        return;
    }
    let (fx, plugins) = signed_fixture("GOODKEY").await;

    fx.installer(plugins)
        .install("tool", VERSION, &fx.root())
        .unwrap();

    assert_eq!(std::fs::read(fx.root().join("bin/tool")).unwrap(), BINARY);
    assert!(!fx.root().join("bin/minisign").exists());
    assert!(fx.scratch_is_clean());
}

#[cfg(unix)]
#[tokio::test]
async fn test_minisign_bootstrap_rejects_bad_signature() {
    if which::which("minisign").is_ok() {
        return;
    }
    let (fx, plugins) = signed_fixture("BADKEY").await;

    let err = fx
        .installer(plugins)
        .install("tool", VERSION, &fx.root())
        .unwrap_err();

    match err {
        Error::SignatureInvalid { file, message } => {
            assert_eq!(file, SIGNED);
            assert_eq!(message, "bad");
        }
        other => panic!("expected SignatureInvalid, got {other:?}"),
    }
    assert!(!fx.root().exists());
    assert!(fx.scratch_is_clean());
}
