use crate::domain::change::{FileChange, FileStatus};

/// Layout directories that carry no meaning as a commit scope.
const STRUCTURAL_DIRS: [&str; 4] = ["src", "lib", "test", "tests"];

/// A finished Conventional Commits header, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(pub String);

impl CommitMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First ancestor directory that names a module rather than a layout
/// convention; `None` for top-level files.
pub fn extract_scope(file_path: &str) -> Option<String> {
    let normalized = file_path.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').collect();
    let (_, dir_segments) = segments.split_last()?;

    dir_segments
        .iter()
        .find(|segment| !segment.is_empty() && !STRUCTURAL_DIRS.contains(*segment))
        .map(|segment| (*segment).to_string())
}

fn file_name(file_path: &str) -> String {
    file_path
        .replace('\\', "/")
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| file_path.to_string())
}

/// Deterministic Turkish commit message for the given changes. Always
/// produces a valid `type[(scope)]: description` header, whatever the input.
pub fn fallback_message(files: &[FileChange], include_scope: bool) -> CommitMessage {
    if files.is_empty() {
        return CommitMessage("chore: dosyalar güncellendi".to_string());
    }

    let (kind, description, scope) = if let [only] = files {
        let name = file_name(&only.file_path);
        let (kind, description) = match only.status {
            FileStatus::Added => ("feat", format!("{name} eklendi")),
            FileStatus::Deleted => ("chore", format!("{name} kaldırıldı")),
            FileStatus::Modified => ("chore", format!("{name} güncellendi")),
        };
        let scope = include_scope
            .then(|| extract_scope(&only.file_path))
            .flatten();
        (kind, description, scope)
    } else {
        let scope = include_scope
            .then(|| extract_scope(&files[0].file_path))
            .flatten();
        ("chore", "birden fazla dosya güncellendi".to_string(), scope)
    };

    match scope {
        Some(scope) => CommitMessage(format!("{kind}({scope}): {description}")),
        None => CommitMessage(format!("{kind}: {description}")),
    }
}

/// Strips whitespace and matching quote/backtick layers a model may wrap
/// its answer in, until a full pass changes nothing. Interior content is
/// never touched; an unmatched wrapping character is left alone.
pub fn clean_response(text: &str) -> String {
    let mut cleaned = text.trim().to_string();

    // Every continuing pass strips at least one character, so the input
    // length bounds the loop.
    for _ in 0..=text.len() {
        let mut changed = false;

        let trimmed = cleaned.trim();
        if trimmed.len() != cleaned.len() {
            cleaned = trimmed.to_string();
            changed = true;
        }

        for quote in ['"', '\'', '`'] {
            if cleaned.len() >= 2 && cleaned.starts_with(quote) && cleaned.ends_with(quote) {
                cleaned = cleaned[1..cleaned.len() - 1].to_string();
                changed = true;
                break;
            }
        }

        if !changed {
            break;
        }
    }

    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const VALID_TYPES: [&str; 11] = [
        "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore",
        "revert",
    ];

    fn change(status: FileStatus, file_path: &str) -> FileChange {
        FileChange {
            status,
            file_path: file_path.to_string(),
        }
    }

    // Splits `type[(scope)]: description` by hand; returns None when the
    // header grammar does not hold.
    fn parse_header(message: &str) -> Option<(&str, Option<&str>, &str)> {
        let (header, description) = message.split_once(": ")?;
        if description.is_empty() {
            return None;
        }
        let (kind, scope) = match header.split_once('(') {
            Some((kind, rest)) => {
                let scope = rest.strip_suffix(')')?;
                if scope.is_empty() || scope.contains('(') || scope.contains(')') {
                    return None;
                }
                (kind, Some(scope))
            }
            None => (header, None),
        };
        if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }
        Some((kind, scope, description))
    }

    #[test]
    fn extracts_first_meaningful_directory_as_scope() {
        assert_eq!(
            extract_scope("src/components/Button.tsx"),
            Some("components".to_string())
        );
        assert_eq!(extract_scope("README.md"), None);
        assert_eq!(
            extract_scope("src/lib/utils/helper.ts"),
            Some("utils".to_string())
        );
        assert_eq!(extract_scope("src/index.ts"), None);
        assert_eq!(extract_scope("tests/lib/fixture.json"), None);
    }

    #[test]
    fn scope_handles_backslash_separators() {
        assert_eq!(
            extract_scope("src\\components\\Button.tsx"),
            Some("components".to_string())
        );
    }

    #[test]
    fn empty_change_list_yields_generic_message() {
        let message = fallback_message(&[], true);
        assert_eq!(message.as_str(), "chore: dosyalar güncellendi");
    }

    #[test]
    fn single_modified_file_without_scope() {
        let message = fallback_message(&[change(FileStatus::Modified, "README.md")], false);
        assert_eq!(message.as_str(), "chore: README.md güncellendi");
    }

    #[test]
    fn single_added_file_with_scope() {
        let message = fallback_message(
            &[change(FileStatus::Added, "src/components/Button.tsx")],
            true,
        );
        assert_eq!(message.as_str(), "feat(components): Button.tsx eklendi");
    }

    #[test]
    fn single_deleted_file() {
        let message = fallback_message(&[change(FileStatus::Deleted, "src/old.ts")], true);
        assert_eq!(message.as_str(), "chore: old.ts kaldırıldı");
    }

    #[test]
    fn multiple_files_use_fixed_description_and_first_scope() {
        let files = [
            change(FileStatus::Added, "src/api/client.ts"),
            change(FileStatus::Modified, "src/components/Button.tsx"),
        ];
        let message = fallback_message(&files, true);
        assert_eq!(message.as_str(), "chore(api): birden fazla dosya güncellendi");

        let message = fallback_message(&files, false);
        assert_eq!(message.as_str(), "chore: birden fazla dosya güncellendi");
    }

    #[test]
    fn scope_omitted_when_all_directories_are_structural() {
        let message = fallback_message(&[change(FileStatus::Added, "src/main.ts")], true);
        assert_eq!(message.as_str(), "feat: main.ts eklendi");
    }

    #[test]
    fn clean_unwraps_nested_mixed_layers() {
        assert_eq!(clean_response("  \"`fix: hata düzeltildi`\"  "), "fix: hata düzeltildi");
        assert_eq!(clean_response("'\"chore: temizlik\"'"), "chore: temizlik");
        assert_eq!(clean_response("\n\t feat: eklendi \t\n"), "feat: eklendi");
    }

    #[test]
    fn clean_leaves_unmatched_wrapping_alone() {
        assert_eq!(clean_response("\"feat: yarım"), "\"feat: yarım");
        assert_eq!(clean_response("feat: yarım'"), "feat: yarım'");
        assert_eq!(clean_response("\"feat: karışık'"), "\"feat: karışık'");
    }

    #[test]
    fn clean_degenerates_to_empty() {
        assert_eq!(clean_response(""), "");
        assert_eq!(clean_response("   "), "");
        assert_eq!(clean_response("\"\""), "");
        assert_eq!(clean_response("\"''\""), "");
        assert_eq!(clean_response("` '' `"), "");
        assert_eq!(clean_response("\""), "\"");
    }

    #[test]
    fn clean_preserves_interior_quotes() {
        assert_eq!(clean_response("fix: 'null' kontrolü eklendi"), "fix: 'null' kontrolü eklendi");
    }

    fn file_status_strategy() -> impl Strategy<Value = FileStatus> {
        prop_oneof![
            Just(FileStatus::Added),
            Just(FileStatus::Modified),
            Just(FileStatus::Deleted),
        ]
    }

    fn file_path_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..5)
            .prop_map(|segments| segments.join("/"))
    }

    fn changes_strategy() -> impl Strategy<Value = Vec<FileChange>> {
        proptest::collection::vec(
            (file_status_strategy(), file_path_strategy())
                .prop_map(|(status, file_path)| FileChange { status, file_path }),
            0..8,
        )
    }

    proptest! {
        #[test]
        fn fallback_always_matches_header_grammar(
            files in changes_strategy(),
            include_scope in any::<bool>(),
        ) {
            let message = fallback_message(&files, include_scope);
            let parsed = parse_header(message.as_str());
            prop_assert!(parsed.is_some(), "bad header: {}", message.as_str());
            let (kind, _, description) = parsed.unwrap();
            prop_assert!(VALID_TYPES.contains(&kind));
            prop_assert!(!description.is_empty());
        }

        #[test]
        fn two_or_more_files_use_fixed_description(
            files in proptest::collection::vec(
                (file_status_strategy(), file_path_strategy())
                    .prop_map(|(status, file_path)| FileChange { status, file_path }),
                2..8,
            ),
            include_scope in any::<bool>(),
        ) {
            let message = fallback_message(&files, include_scope);
            let (_, _, description) = parse_header(message.as_str()).unwrap();
            prop_assert_eq!(description, "birden fazla dosya güncellendi");
        }

        #[test]
        fn clean_is_idempotent(text in any::<String>()) {
            let once = clean_response(&text);
            prop_assert_eq!(clean_response(&once), once.clone());
        }

        #[test]
        fn clean_never_leaves_outer_whitespace(text in any::<String>()) {
            let cleaned = clean_response(&text);
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }

        #[test]
        fn clean_recovers_wrapped_inner_text(
            inner in any::<String>(),
            layers in proptest::collection::vec(
                prop_oneof![
                    Just("\"".to_string()),
                    Just("'".to_string()),
                    Just("`".to_string()),
                    " {1,3}".prop_map(|ws: String| ws),
                ],
                0..5,
            ),
        ) {
            let inner: String = inner
                .trim_matches(|c: char| matches!(c, '"' | '\'' | '`') || c.is_whitespace())
                .to_string();
            let wrapped = layers
                .iter()
                .fold(inner.clone(), |acc, layer| format!("{layer}{acc}{layer}"));
            prop_assert_eq!(clean_response(&wrapped), inner);
        }
    }
}
