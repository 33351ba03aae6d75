use std::{
    collections::HashSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{domain::FullMonthName, errors::Error, months, Result};

use super::LinkRepository;

/// Characters of the month token compared during lookup.
const LOOKUP_PREFIX_CHARS: usize = 3;

/// Flat-file registry: one `Month=link` record per line.
///
/// Every call re-reads the whole file; nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct FileLinkRepository {
    path: PathBuf,
}

impl FileLinkRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_optional(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::StorageRead {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[async_trait]
impl LinkRepository for FileLinkRepository {
    async fn upsert(&self, month_input: &str, link: &str) -> Result<FullMonthName> {
        let month = months::resolve_prefix(month_input)
            .ok_or_else(|| Error::UnrecognizedMonth(month_input.to_string()))?;

        let current = self.read_optional().await?.unwrap_or_default();
        let rewritten = rewrite_with_record(&current, &month, link);
        tokio::fs::write(&self.path, rewritten)
            .await
            .map_err(|source| Error::StorageWrite {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(month = %month, link, "registry record updated");
        Ok(month)
    }

    async fn lookup_by_month_prefix(&self, month_token: &str) -> Result<Option<String>> {
        let Some(content) = self.read_optional().await? else {
            return Ok(None);
        };
        Ok(find_link(&content, month_token))
    }

    async fn dump_all(&self) -> Result<String> {
        self.read_optional()
            .await?
            .ok_or_else(|| Error::FileNotFound(self.path.clone()))
    }
}

/// Apply `month=link` to the stored content and normalize it.
///
/// Matching month lines are replaced in place, blank lines dropped, and lines
/// repeating an earlier line's link removed. The record is appended only when
/// no line for the month survives.
fn rewrite_with_record(content: &str, month: &FullMonthName, link: &str) -> String {
    let month_lower = month.as_str().to_lowercase();
    let record = format!("{month}={link}");

    let updated = content
        .split('\n')
        .map(|line| {
            let existing_month = line.split('=').next().unwrap_or("");
            if !existing_month.is_empty() && existing_month.to_lowercase() == month_lower {
                record.clone()
            } else {
                line.to_string()
            }
        })
        .filter(|line| !line.trim().is_empty());

    let mut seen_links: HashSet<Option<String>> = HashSet::new();
    let mut lines: Vec<String> = Vec::new();
    for line in updated {
        let existing_link = line.split_once('=').map(|(_, l)| l.to_string());
        if seen_links.insert(existing_link) {
            lines.push(line);
        }
    }

    let key = format!("{month_lower}=");
    if !lines.iter().any(|l| l.to_lowercase().starts_with(&key)) {
        lines.push(record);
    }

    lines.join("\n")
}

fn find_link(content: &str, month_token: &str) -> Option<String> {
    let prefix: String = month_token
        .to_lowercase()
        .chars()
        .take(LOOKUP_PREFIX_CHARS)
        .collect();

    content
        .split('\n')
        .filter_map(|line| line.split_once('='))
        .find(|(month, _)| month.to_lowercase().starts_with(&prefix))
        .map(|(_, link)| link.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_in(dir: &tempfile::TempDir) -> FileLinkRepository {
        FileLinkRepository::new(dir.path().join("links.txt"))
    }

    fn month(name: &str) -> FullMonthName {
        FullMonthName(name.to_string())
    }

    #[test]
    fn rewrite_replaces_in_place_and_strips_blank_lines() {
        let content = "Января=a\n\n  \nМарта=b\n";
        let out = rewrite_with_record(content, &month("Марта"), "c");
        assert_eq!(out, "Января=a\nМарта=c");
    }

    #[test]
    fn rewrite_matches_month_case_insensitively() {
        let out = rewrite_with_record("МАРТА=b", &month("Марта"), "c");
        assert_eq!(out, "Марта=c");
    }

    #[test]
    fn rewrite_keeps_first_line_for_shared_link() {
        let content = "Января=x\nФевраля=x\nМарта=y";
        let out = rewrite_with_record(content, &month("Апреля"), "z");
        assert_eq!(out, "Января=x\nМарта=y\nАпреля=z");
    }

    #[test]
    fn rewrite_reappends_month_dropped_by_link_dedup() {
        // Февраля takes Января's link: the replaced line is a duplicate and is
        // dropped, then the record is appended again at the end.
        let content = "Января=x\nФевраля=y";
        let out = rewrite_with_record(content, &month("Февраля"), "x");
        assert_eq!(out, "Января=x\nФевраля=x");
    }

    #[test]
    fn rewrite_on_empty_content_creates_single_record() {
        assert_eq!(
            rewrite_with_record("", &month("Мая"), "http://m"),
            "Мая=http://m"
        );
    }

    #[test]
    fn rewrite_keeps_equals_inside_link() {
        let out = rewrite_with_record("Июня=http://a?x=1", &month("Июля"), "http://a?x=2");
        assert_eq!(out, "Июня=http://a?x=1\nИюля=http://a?x=2");
    }

    #[test]
    fn find_link_uses_three_letter_prefix() {
        let content = "Января=a\nИюня=b\nИюля=c";
        assert_eq!(find_link(content, "июл"), Some("c".to_string()));
        assert_eq!(find_link(content, "Июнь"), Some("b".to_string()));
        assert_eq!(find_link(content, "январь"), Some("a".to_string()));
        assert_eq!(find_link(content, "дек"), None);
    }

    #[tokio::test]
    async fn upsert_then_lookup_for_every_month() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        for (idx, full) in months::GENITIVE_MONTHS.iter().enumerate() {
            let link = format!("https://example.com/{idx}");
            let short: String = full.chars().take(3).collect();
            let stored = repo.upsert(&short, &link).await.unwrap();
            assert_eq!(stored.as_str(), months::capitalize(full));
            assert_eq!(
                repo.lookup_by_month_prefix(&short).await.unwrap(),
                Some(link)
            );
        }

        let dump = repo.dump_all().await.unwrap();
        assert_eq!(dump.lines().count(), 12);
    }

    #[tokio::test]
    async fn upsert_twice_keeps_latest_link() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.upsert("мар", "http://old").await.unwrap();
        repo.upsert("МАРТ", "http://new").await.unwrap();

        assert_eq!(repo.dump_all().await.unwrap(), "Марта=http://new");
    }

    #[tokio::test]
    async fn shared_link_collapses_on_next_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.upsert("янв", "http://same").await.unwrap();
        repo.upsert("фев", "http://same").await.unwrap();
        assert_eq!(
            repo.dump_all().await.unwrap(),
            "Января=http://same\nФевраля=http://same"
        );

        repo.upsert("мар", "http://other").await.unwrap();
        let dump = repo.dump_all().await.unwrap();
        assert_eq!(dump, "Января=http://same\nМарта=http://other");
        assert_eq!(dump.matches("http://same").count(), 1);
    }

    #[tokio::test]
    async fn unrecognized_month_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        let err = repo.upsert("foo", "http://x").await.unwrap_err();
        assert!(matches!(err, Error::UnrecognizedMonth(ref m) if m == "foo"));
        assert!(!repo.path().exists());
    }

    #[tokio::test]
    async fn lookup_without_file_or_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        assert_eq!(repo.lookup_by_month_prefix("мая").await.unwrap(), None);
        repo.upsert("янв", "http://x").await.unwrap();
        assert_eq!(repo.lookup_by_month_prefix("мая").await.unwrap(), None);
    }

    #[tokio::test]
    async fn dump_before_first_write_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        let err = repo.dump_all().await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[tokio::test]
    async fn dump_returns_content_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(repo.path(), "Января=a\n\nМарта=b\n").unwrap();

        assert_eq!(repo.dump_all().await.unwrap(), "Января=a\n\nМарта=b\n");

        repo.upsert("апр", "c").await.unwrap();
        assert_eq!(repo.dump_all().await.unwrap(), "Января=a\nМарта=b\nАпреля=c");
    }

    #[tokio::test]
    async fn write_failure_is_a_storage_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLinkRepository::new(dir.path().join("missing-dir").join("links.txt"));

        let err = repo.upsert("янв", "http://x").await.unwrap_err();
        assert!(matches!(err, Error::StorageWrite { .. }));
    }

    #[tokio::test]
    async fn unreadable_store_is_a_storage_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text.
        let repo = FileLinkRepository::new(dir.path());

        let err = repo.upsert("янв", "http://x").await.unwrap_err();
        assert!(matches!(err, Error::StorageRead { .. }));
        assert!(matches!(
            repo.lookup_by_month_prefix("янв").await,
            Err(Error::StorageRead { .. })
        ));
        assert!(matches!(
            repo.dump_all().await,
            Err(Error::StorageRead { .. })
        ));
    }
}
