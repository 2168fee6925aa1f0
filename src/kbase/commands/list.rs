use crate::commands::CmdResult;
use crate::config::SortOrder;
use crate::error::Result;
use crate::filter::ListOptions;
use crate::store::PostStore;

pub fn run<S: PostStore>(store: &S, options: &ListOptions, sort: SortOrder) -> Result<CmdResult> {
    let mut posts = store.list(options)?;
    sort.apply(&mut posts);
    Ok(CmdResult::default().with_listed_posts(posts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::test_utils::TestEnv;

    fn seed(env: &TestEnv) {
        for i in 0..10 {
            create::run(
                &env.store,
                format!("title{i}"),
                format!("content{i}"),
                vec![format!("tag{i}")],
            )
            .unwrap();
        }
    }

    fn titles(result: &CmdResult) -> Vec<&str> {
        result.listed_posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn lists_everything_without_filters() {
        let env = TestEnv::new();
        seed(&env);
        let result = run(&env.store, &ListOptions::default(), SortOrder::Created).unwrap();
        assert_eq!(result.listed_posts.len(), 10);
    }

    #[test]
    fn search_term_finds_one_post() {
        let env = TestEnv::new();
        seed(&env);
        let opts = ListOptions::new().search("content7");
        let result = run(&env.store, &opts, SortOrder::Created).unwrap();
        assert_eq!(titles(&result), vec!["title7"]);
    }

    #[test]
    fn tag_filter_is_any_of() {
        let env = TestEnv::new();
        seed(&env);
        let opts = ListOptions::new().tags(["tag3", "tag5"]);
        let result = run(&env.store, &opts, SortOrder::Title).unwrap();
        assert_eq!(titles(&result), vec!["title3", "title5"]);
    }

    #[test]
    fn search_and_tags_must_both_match() {
        let env = TestEnv::new();
        seed(&env);
        let opts = ListOptions::new().search("content7").tags(["tag3"]);
        let result = run(&env.store, &opts, SortOrder::Created).unwrap();
        assert!(result.listed_posts.is_empty());
    }
}
