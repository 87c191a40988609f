//! Build-context discovery over temporary directory trees

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use docktree::application::services::ContextService;
use docktree::application::ApplicationError;
use docktree::config::Settings;
use docktree::domain::{DomainError, Indexed, TreeRenderer};
use docktree::infrastructure::traits::{FileSystem, RealFileSystem};
use docktree::util::testing;

fn write_dockerfile(root: &Path, relative: &str, content: &str) {
    let dir = root.join(relative);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Dockerfile"), content).unwrap();
}

/// ```text
/// Dockerfile                      (search root, ignored)
/// debian/Dockerfile               FROM debian:latest
/// base/debian-jdk8/Dockerfile     FROM debian
/// base/debian-jdk8_ui/Dockerfile  FROM base/debian:jdk8
/// tools/scratchy/Dockerfile       no FROM line
/// ```
fn image_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_dockerfile(root, "", "FROM ignored:latest\n");
    write_dockerfile(root, "debian", "FROM debian:latest\nRUN apt-get update\n");
    write_dockerfile(root, "base/debian-jdk8", "# java\nFROM debian\n");
    write_dockerfile(
        root,
        "base/debian-jdk8_ui",
        "FROM base/debian:jdk8\nENV DISPLAY=:0\n",
    );
    write_dockerfile(root, "tools/scratchy", "RUN true\n");
    fs::write(root.join("base/README.md"), "not a context").unwrap();
    temp
}

fn service(settings: Settings) -> ContextService {
    ContextService::new(Arc::new(RealFileSystem), Arc::new(settings))
}

#[test]
fn given_image_tree_when_finding_contexts_then_names_tags_and_parents_derived() {
    testing::init_test_setup();
    let temp = image_tree();

    let contexts = service(Settings::default())
        .find_contexts(temp.path())
        .unwrap();

    let found: Vec<(&str, &str, &str)> = contexts
        .values()
        .map(|c| (c.name.as_str(), c.tag.as_str(), c.parent.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("debian", "debian", "debian:latest"),
            ("debian-jdk8", "base/debian:jdk8", "debian"),
            ("debian-jdk8_ui", "base/debian:jdk8-ui", "base/debian:jdk8"),
            ("scratchy", "tools/scratchy", "?"),
        ]
    );

    let root = temp.path().canonicalize().unwrap();
    assert_eq!(contexts["debian-jdk8"].path, root.join("base/debian-jdk8"));
}

#[test]
fn given_image_tree_when_building_hierarchy_then_rendered_by_parent_image() {
    testing::init_test_setup();
    let temp = image_tree();

    let index = service(Settings::default()).hierarchy(temp.path()).unwrap();

    assert_eq!(index.node_count(), 4);
    assert_eq!(index.root_of("base/debian:jdk8-ui").map(|r| r.index()), Some("debian:latest"));
    assert_eq!(
        TreeRenderer::new(&index).render_to_vec(),
        vec![
            ".",
            "├── ?*",
            "│   └── tools/scratchy",
            "└── debian:latest*",
            "    └── debian",
            "        └── base/debian:jdk8",
            "            └── base/debian:jdk8-ui",
        ]
    );
}

#[test]
fn given_same_basename_twice_when_finding_contexts_then_duplicate_error_lists_paths() {
    let temp = TempDir::new().unwrap();
    write_dockerfile(temp.path(), "a/app", "FROM alpine\n");
    write_dockerfile(temp.path(), "b/app", "FROM alpine\n");

    let result = service(Settings::default()).find_contexts(temp.path());

    match result {
        Err(ApplicationError::Domain(DomainError::DuplicatedContext { name, paths })) => {
            assert_eq!(name, "app");
            assert_eq!(paths.len(), 2);
            assert!(paths[0].ends_with("a/app"));
            assert!(paths[1].ends_with("b/app"));
        }
        other => panic!("expected DuplicatedContext, got {other:?}"),
    }
}

#[test]
fn given_only_root_dockerfile_when_finding_contexts_then_no_context_error() {
    let temp = TempDir::new().unwrap();
    write_dockerfile(temp.path(), "", "FROM alpine\n");
    fs::create_dir(temp.path().join("empty")).unwrap();

    let result = service(Settings::default()).find_contexts(temp.path());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NoContext(_)))
    ));
}

#[test]
fn given_missing_directory_when_finding_contexts_then_invalid_search_dir() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");

    let result = service(Settings::default()).find_contexts(&missing);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidSearchDir(p))) if p == missing
    ));
}

#[test]
fn given_max_depth_when_finding_contexts_then_deeper_dockerfiles_ignored() {
    let temp = image_tree();
    let settings = Settings {
        max_depth: Some(2),
        ..Default::default()
    };

    let contexts = service(settings).find_contexts(temp.path()).unwrap();

    assert_eq!(contexts.keys().collect::<Vec<_>>(), vec!["debian"]);
}

#[test]
fn given_custom_file_name_and_directive_when_finding_contexts_then_settings_applied() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("web");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Containerfile"), "BASE nginx:1.25\n").unwrap();
    write_dockerfile(temp.path(), "ignored", "FROM alpine\n");
    let settings = Settings {
        dockerfile: "Containerfile".into(),
        parent_directive: "BASE ".into(),
        unknown_parent: "<none>".into(),
        ..Default::default()
    };

    let contexts = service(settings).find_contexts(temp.path()).unwrap();

    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts["web"].parent, "nginx:1.25");
}

#[test]
fn given_known_and_unknown_names_when_finding_single_context_then_lookup_result() {
    let temp = image_tree();
    let service = service(Settings::default());

    let context = service.find_context(temp.path(), "scratchy").unwrap();
    assert_eq!(context.tag, "tools/scratchy");

    let result = service.find_context(temp.path(), "ubuntu");
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::ContextNotFound(name))) if name == "ubuntu"
    ));
}

struct UnreadableFileSystem;

impl FileSystem for UnreadableFileSystem {
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        path.canonicalize()
    }
}

#[test]
fn given_unreadable_dockerfile_when_finding_contexts_then_operation_failed_names_file() {
    let temp = TempDir::new().unwrap();
    write_dockerfile(temp.path(), "app", "FROM alpine\n");
    let service = ContextService::new(
        Arc::new(UnreadableFileSystem),
        Arc::new(Settings::default()),
    );

    let result = service.find_contexts(temp.path());

    match result {
        Err(ApplicationError::OperationFailed { context, .. }) => {
            assert!(context.starts_with("read Dockerfile: "));
            assert!(context.ends_with("Dockerfile"));
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}
