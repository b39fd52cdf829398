// tests/tool_resolution.rs

//! Tool resolution against in-memory index documents.

mod common;

use common::{package_update, updates_xml, StaticTransport};
use qtrepo::{ArchiveResolver, Error, ResolverConfig, ToolArchiveResolver, ToolQuery};

const MINGW_INDEX: &str =
    "https://download.qt.io/online/qtsdkrepository/windows_x86/desktop/tools_mingw/Updates.xml";

fn mingw_index() -> String {
    updates_xml(&[
        package_update("qt.tools.win32_mingw491", "4.9.1-3", Some("i686-4.9.1-release-posix-dwarf-rt_v3-rev2.7z")),
        package_update("qt.tools.win32_mingw530", "5.3.0-2", Some("i686-5.3.0-release-posix-dwarf-rt_v4-rev0.7z")),
        package_update("qt.tools.win64_mingw73", "7.3.0-1-201903151311", Some("x86_64-7.3.0-release-posix-seh-rt_v5-rev0.7z")),
        package_update("qt.tools.win32_mingw491.doc", "4.9.1-3", None),
    ])
}

fn resolve(query: ToolQuery, transport: &StaticTransport) -> qtrepo::Result<Vec<qtrepo::ResolvedArtifact>> {
    ToolArchiveResolver::new(query, &ResolverConfig::default())
        .unwrap()
        .resolve(transport)
}

#[test]
fn test_exact_version_match() {
    let transport = StaticTransport::new().with_document(MINGW_INDEX, &mingw_index());

    let artifacts = resolve(
        ToolQuery::new("windows", "tools_mingw", "4.9.1-3", "win32_mingw491"),
        &transport,
    )
    .unwrap();

    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].package_name, "qt.tools.win32_mingw491");
    assert_eq!(
        artifacts[0].source_url,
        "https://download.qt.io/online/qtsdkrepository/windows_x86/desktop/tools_mingw/\
         qt.tools.win32_mingw491/4.9.1-3i686-4.9.1-release-posix-dwarf-rt_v3-rev2.7z"
    );
    assert_eq!(transport.requests(), vec![MINGW_INDEX.to_string()]);
}

#[test]
fn test_version_prefix_does_not_match() {
    let transport = StaticTransport::new().with_document(MINGW_INDEX, &mingw_index());

    let err = resolve(ToolQuery::new("windows", "tools_mingw", "4.9.1", "win32_mingw491"), &transport).unwrap_err();

    assert!(err.is_no_match(), "{err}");
}

#[test]
fn test_long_version_collapses_directory() {
    let transport = StaticTransport::new().with_document(MINGW_INDEX, &mingw_index());

    let artifacts = resolve(
        ToolQuery::new("windows", "tools_mingw", "7.3.0-1-201903151311", "win64_mingw73"),
        &transport,
    )
    .unwrap();

    assert_eq!(artifacts.len(), 1);
    assert!(artifacts[0]
        .source_url
        .ends_with("/tools_mingw/qt.tools.win64_mingw73/7.3.0-1x86_64-7.3.0-release-posix-seh-rt_v5-rev0.7z"));
}

#[test]
fn test_plain_version_on_linux_with_mirror() {
    let url = "https://mirror.example.org/online/qtsdkrepository/linux_x64/desktop/tools_ifw/Updates.xml";
    let doc = updates_xml(&[
        package_update("qt.tools.ifw.31", "3.1.1", Some("installerbase.7z, repogen.7z")),
        package_update("qt.tools.ifw.32", "3.2.0", Some("installerbase.7z")),
    ]);
    let transport = StaticTransport::new().with_document(url, &doc);
    let config = ResolverConfig::default().with_mirror(Some("https://mirror.example.org/".to_string()));

    let artifacts = ToolArchiveResolver::new(ToolQuery::new("linux", "tools_ifw", "3.1.1", "qt.tools.ifw.31"), &config)
        .unwrap()
        .resolve(&transport)
        .unwrap();

    let urls: Vec<_> = artifacts.iter().map(|a| a.source_url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://mirror.example.org/online/qtsdkrepository/linux_x64/desktop/tools_ifw/qt.tools.ifw.31/3.1.1installerbase.7z",
            "https://mirror.example.org/online/qtsdkrepository/linux_x64/desktop/tools_ifw/qt.tools.ifw.31/3.1.1repogen.7z",
        ]
    );
    assert!(artifacts.iter().all(|a| a.has_mirror));
}

#[test]
fn test_every_record_at_version_is_selected() {
    let doc = updates_xml(&[
        package_update("qt.tools.openssl.win_x86", "1.1.1-4", Some("openssl_x86.7z")),
        package_update("qt.tools.openssl.win_x64", "1.1.1-4", Some("openssl_x64.7z")),
        package_update("qt.tools.openssl.src", "1.1.1-3", Some("openssl_src.7z")),
    ]);
    let url = "https://download.qt.io/online/qtsdkrepository/windows_x86/desktop/tools_openssl_x64/Updates.xml";
    let transport = StaticTransport::new().with_document(url, &doc);

    let artifacts = resolve(
        ToolQuery::new("windows", "tools_openssl_x64", "1.1.1-4", "qt.tools.openssl.win_x64"),
        &transport,
    )
    .unwrap();

    let names: Vec<_> = artifacts.iter().map(|a| a.package_name.as_str()).collect();
    assert_eq!(names, vec!["qt.tools.openssl.win_x86", "qt.tools.openssl.win_x64"]);
}

#[test]
fn test_tool_transport_and_parse_errors() {
    let missing = StaticTransport::new();
    let err = resolve(ToolQuery::new("linux", "tools_ifw", "3.1.1", "qt.tools.ifw.31"), &missing).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    let url = "https://download.qt.io/online/qtsdkrepository/linux_x64/desktop/tools_ifw/Updates.xml";
    let broken = StaticTransport::new().with_document(url, "<Updates><PackageUpdate></Updates>");
    let err = resolve(ToolQuery::new("linux", "tools_ifw", "3.1.1", "qt.tools.ifw.31"), &broken).unwrap_err();
    assert!(matches!(err, Error::IndexParse(_)));
}
