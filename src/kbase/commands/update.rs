use crate::commands::{CmdMessage, CmdResult, PostUpdate};
use crate::error::Result;
use crate::store::PostStore;
use log::info;

/// Fetches the post, applies `update` and writes it back. The created time
/// travels with the fetched record; the store stamps the modified time.
pub fn run<S: PostStore>(store: &S, update: &PostUpdate) -> Result<CmdResult> {
    let mut post = store.get(&update.id)?;
    let mut result = CmdResult::default();

    if update.is_empty() {
        result.add_message(CmdMessage::info(format!("Nothing to update for {}", post.id)));
        return Ok(result.with_affected_posts(vec![post]));
    }

    for tag in &update.remove_tags {
        if !update.clear_tags && !post.tags.contains(tag) {
            result.add_message(CmdMessage::warning(format!("Tag not present: {}", tag)));
        }
    }
    update.apply_to(&mut post);
    let post = store.update(post)?;
    info!("event=post_update id={}", post.id);

    result.add_message(CmdMessage::success(format!(
        "Post updated ({}): {}",
        post.id, post.title
    )));
    Ok(result.with_affected_posts(vec![post]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::error::KbError;
    use crate::id::PostId;
    use crate::test_utils::TestEnv;

    #[test]
    fn updates_post_content() {
        let env = TestEnv::new();
        let created = create::run(&env.store, "Title".into(), "Old".into(), vec![]).unwrap();
        let original = created.affected_posts[0].clone();

        let update = PostUpdate::new(original.id.clone())
            .content("New")
            .add_tag("_dir:inbox");
        run(&env.store, &update).unwrap();

        let stored = env.store.get(&original.id).unwrap();
        assert_eq!(stored.title, "Title");
        assert_eq!(stored.content, "New");
        assert_eq!(stored.tags, vec!["_dir:inbox"]);
        assert_eq!(stored.created_time, original.created_time);
        assert!(stored.modified_time > original.modified_time);
    }

    #[test]
    fn empty_update_does_not_touch_the_file() {
        let env = TestEnv::new();
        let created = create::run(&env.store, "T".into(), "".into(), vec![]).unwrap();
        let original = created.affected_posts[0].clone();

        run(&env.store, &PostUpdate::new(original.id.clone())).unwrap();
        let stored = env.store.get(&original.id).unwrap();
        assert_eq!(stored.modified_time, original.modified_time);
    }

    #[test]
    fn unknown_post_is_not_found() {
        let env = TestEnv::new();
        let id: PostId = "0190f1a2b3c47d8e9f00112233445566".parse().unwrap();
        let err = run(&env.store, &PostUpdate::new(id).title("x")).unwrap_err();
        assert!(matches!(err, KbError::NotFound(_)));
    }

    #[test]
    fn removing_an_absent_tag_warns() {
        let env = TestEnv::new();
        let created = create::run(&env.store, "T".into(), "".into(), vec!["a".into()]).unwrap();
        let id = created.affected_posts[0].id.clone();

        let result = run(&env.store, &PostUpdate::new(id.clone()).remove_tag("zzz")).unwrap();
        assert!(matches!(result.messages[0].level, crate::commands::MessageLevel::Warning));
        assert_eq!(env.store.get(&id).unwrap().tags, vec!["a"]);
    }
}
