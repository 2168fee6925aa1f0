use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Post;
use crate::store::PostStore;
use log::info;

pub fn run<S: PostStore>(
    store: &S,
    title: String,
    content: String,
    tags: Vec<String>,
) -> Result<CmdResult> {
    let post = store.create(Post::new(title, content, tags))?;
    info!("event=post_create id={}", post.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Post created ({}): {}",
        post.id, post.title
    )));
    Ok(result.with_affected_posts(vec![post]))
}
