use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::ListOptions;
use crate::store::PostStore;
use crate::tags::group_by_directory;
use crate::tree::build_tree;

/// Folder view of every post carrying at least one `_dir:` tag.
pub fn run<S: PostStore>(store: &S) -> Result<CmdResult> {
    let posts = store.list(&ListOptions::default())?;
    let tree = build_tree(group_by_directory(posts));

    let mut folders = 0usize;
    let mut placements = 0usize;
    tree.walk(tree.root(), |depth, id| {
        if depth > 0 {
            folders += 1;
        }
        placements += tree.value(id).len();
    });

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} folders, {} posts placed",
        folders, placements
    )));
    Ok(result.with_tree(tree))
}
