use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::ListOptions;
use crate::store::PostStore;
use crate::tags::list_tags;

/// Distinct tags across all posts, sorted. Functional (`_`-prefixed) tags
/// are dropped when `ignore_functional` is set.
pub fn run<S: PostStore>(store: &S, ignore_functional: bool) -> Result<CmdResult> {
    let posts = store.list(&ListOptions::default())?;
    Ok(CmdResult::default().with_tags(list_tags(&posts, ignore_functional)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::test_utils::TestEnv;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn lists_user_tags_only() {
        let env = TestEnv::new();
        create::run(&env.store, "foo".into(), "bar".into(), tags(&["a", "b", "c", "_dir:/foo"]))
            .unwrap();
        create::run(&env.store, "alice".into(), "bob".into(), tags(&["d", "e", "_dir:/foo/bar"]))
            .unwrap();

        let result = run(&env.store, true).unwrap();
        assert_eq!(result.tags, vec!["a", "b", "c", "d", "e"]);

        let result = run(&env.store, false).unwrap();
        assert_eq!(result.tags.len(), 7);
        assert!(result.tags.contains(&"_dir:/foo/bar".to_string()));
    }

    #[test]
    fn empty_store_has_no_tags() {
        let env = TestEnv::new();
        assert!(run(&env.store, true).unwrap().tags.is_empty());
    }
}
