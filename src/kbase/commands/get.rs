use crate::commands::CmdResult;
use crate::error::Result;
use crate::id::PostId;
use crate::store::PostStore;

/// Fetches posts by id, in the order given. Any unknown id fails the whole call.
pub fn run<S: PostStore, I: AsRef<str>>(store: &S, ids: &[I]) -> Result<CmdResult> {
    let mut posts = Vec::with_capacity(ids.len());
    for raw in ids {
        let id: PostId = raw.as_ref().parse()?;
        posts.push(store.get(&id)?);
    }
    Ok(CmdResult::default().with_listed_posts(posts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::error::KbError;
    use crate::test_utils::TestEnv;

    #[test]
    fn gets_posts_in_requested_order() {
        let env = TestEnv::new();
        let a = create::run(&env.store, "A".into(), "".into(), vec![]).unwrap();
        let b = create::run(&env.store, "B".into(), "".into(), vec![]).unwrap();
        let ids = [
            b.affected_posts[0].id.to_string(),
            a.affected_posts[0].id.to_string(),
        ];

        let result = run(&env.store, &ids).unwrap();
        let titles: Vec<_> = result.listed_posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let env = TestEnv::new();
        let err = run(&env.store, &["0190f1a2b3c47d8e9f00112233445566"]).unwrap_err();
        assert!(matches!(err, KbError::NotFound(_)));
    }

    #[test]
    fn path_like_id_is_not_found() {
        let env = TestEnv::new();
        let err = run(&env.store, &["../config"]).unwrap_err();
        assert!(matches!(err, KbError::NotFound(_)));
    }
}
