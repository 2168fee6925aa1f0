use kbase::api::{KbApi, KbPaths, PostUpdate};
use kbase::config::SortOrder;
use kbase::error::KbError;
use kbase::filter::ListOptions;
use kbase::id::PostId;
use kbase::model::Post;
use kbase::store::fs::FileStore;
use kbase::store::PostStore;
use kbase::tags::{group_by_directory, list_tags};
use kbase::tree::build_tree;
use std::fs;

fn store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("posts"));
    (dir, store)
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

#[test]
fn create_then_get_round_trips() {
    let (_dir, store) = store();
    let created = store
        .create(Post::new("Title", "# Heading\n\nbody", tags(&["x", "x", "_dir:a"])))
        .unwrap();

    let fetched = store.get(&created.id).unwrap();
    assert_eq!(fetched.title, "Title");
    assert_eq!(fetched.content, "# Heading\n\nbody");
    assert_eq!(fetched.tags, tags(&["x", "x", "_dir:a"]));
    assert_eq!(fetched.created_time, fetched.modified_time);
    assert_eq!(fetched, created);
}

#[test]
fn update_moves_modified_time_forward_only() {
    let (_dir, store) = store();
    let original = store.create(Post::new("t", "c", vec![])).unwrap();

    let mut changed = original.clone();
    changed.content = "c2".into();
    let first = store.update(changed.clone()).unwrap();
    let second = store.update(changed).unwrap();

    assert!(first.modified_time > original.modified_time);
    assert!(second.modified_time > first.modified_time);
    assert_eq!(second.created_time, original.created_time);
    assert_eq!(store.get(&original.id).unwrap().content, "c2");
}

#[test]
fn update_of_unknown_id_fails_without_writing() {
    let (_dir, store) = store();
    store.create(Post::new("existing", "", vec![])).unwrap();

    let mut ghost = Post::new("ghost", "", vec![]);
    ghost.id = "0190000000007000800000000000dead".parse().unwrap();
    let err = store.update(ghost).unwrap_err();

    assert!(matches!(err, KbError::NotFound(_)));
    assert_eq!(fs::read_dir(store.root()).unwrap().count(), 1);
}

#[test]
fn filter_scenario_over_ten_posts() {
    let (_dir, store) = store();
    for i in 0..10 {
        store
            .create(Post::new(
                format!("title{}", i),
                format!("content{}", i),
                vec![format!("tag{}", i)],
            ))
            .unwrap();
    }

    let found = store.list(&ListOptions::new().search("content7")).unwrap();
    assert_eq!(titles(&found), vec!["title7"]);

    let found = store
        .list(&ListOptions::new().tags(["tag3", "tag5"]))
        .unwrap();
    let mut found_titles = titles(&found);
    found_titles.sort_unstable();
    assert_eq!(found_titles, vec!["title3", "title5"]);

    let found = store
        .list(&ListOptions::new().search("content7").tags(["tag3"]))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn back_to_back_creates_list_in_creation_order() {
    let (_dir, store) = store();
    let created: Vec<PostId> = (0..50)
        .map(|i| store.create(Post::new(format!("p{}", i), "", vec![])).unwrap().id)
        .collect();

    let listed: Vec<PostId> = store
        .list(&ListOptions::default())
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, created);
}

#[test]
fn listing_is_in_creation_order() {
    let (_dir, store) = store();
    for title in ["first", "second", "third"] {
        store.create(Post::new(title, "", vec![])).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    let posts = store.list(&ListOptions::default()).unwrap();
    assert_eq!(titles(&posts), vec!["first", "second", "third"]);
}

#[test]
fn tag_listing_hides_functional_tags() {
    let (_dir, store) = store();
    store
        .create(Post::new("one", "", tags(&["a", "b", "c", "_dir:/foo"])))
        .unwrap();
    store
        .create(Post::new("two", "", tags(&["d", "e", "_dir:/foo/bar"])))
        .unwrap();

    let posts = store.list(&ListOptions::default()).unwrap();
    assert_eq!(list_tags(&posts, true), tags(&["a", "b", "c", "d", "e"]));
    assert_eq!(list_tags(&posts, false).len(), 7);
}

#[test]
fn folder_tree_from_stored_posts() {
    let (_dir, store) = store();
    store.create(Post::new("A", "", tags(&["_dir:foo"]))).unwrap();
    store.create(Post::new("B", "", tags(&["_dir:foo/bar"]))).unwrap();
    store
        .create(Post::new("C", "", tags(&["_dir:foo", "_dir:misc"])))
        .unwrap();
    store.create(Post::new("loose", "", vec![])).unwrap();

    let posts = store.list(&ListOptions::default()).unwrap();
    let tree = build_tree(group_by_directory(posts));
    let root = tree.root();

    let foo = tree.search(root, "foo").unwrap();
    assert_eq!(titles(tree.value(foo)), vec!["A", "C"]);
    let bar = tree.search(foo, "bar").unwrap();
    assert_eq!(titles(tree.value(bar)), vec!["B"]);
    assert_eq!(tree.full_name(bar), "foo/bar");

    let misc = tree.search(root, "misc").unwrap();
    assert_eq!(titles(tree.value(misc)), vec!["C"]);
    assert!(tree.value(root).is_empty());
}

#[test]
fn legacy_records_are_readable() {
    let (dir, store) = store();
    let posts_dir = dir.path().join("posts");
    fs::create_dir_all(&posts_dir).unwrap();
    fs::write(
        posts_dir.join("2Lx3oVZ1pD4q0VQ2m7yq8e9fXyZ"),
        r#"{"ID":"2Lx3oVZ1pD4q0VQ2m7yq8e9fXyZ","Title":"old","Content":"body","Tags":null,
            "CreatedTime":"2021-03-01T10:00:00Z","ModifiedTime":"2021-03-02T10:00:00Z"}"#,
    )
    .unwrap();

    let id: PostId = "2Lx3oVZ1pD4q0VQ2m7yq8e9fXyZ".parse().unwrap();
    let post = store.get(&id).unwrap();
    assert_eq!(post.title, "old");
    assert!(post.tags.is_empty());
    assert_eq!(store.list(&ListOptions::default()).unwrap().len(), 1);
}

#[test]
fn corrupt_file_fails_get_and_list() {
    let (_dir, store) = store();
    let good = store.create(Post::new("good", "", vec![])).unwrap();
    fs::write(store.root().join("broken.json"), "{ not json").unwrap();

    assert!(store.list(&ListOptions::default()).unwrap_err().is_corrupt());
    let broken: PostId = "broken".parse().unwrap();
    assert!(store.get(&broken).unwrap_err().is_corrupt());
    assert_eq!(store.get(&good.id).unwrap().title, "good");
}

#[test]
fn api_edit_flow_with_sorting() {
    let dir = tempfile::tempdir().unwrap();
    let paths = KbPaths::new(dir.path());
    let api = KbApi::new(FileStore::new(paths.posts_dir()), paths);

    let b = api
        .create_post("beta".into(), "".into(), tags(&["x"]))
        .unwrap()
        .affected_posts
        .remove(0);
    api.create_post("Alpha".into(), "".into(), vec![]).unwrap();

    api.update_post(&PostUpdate::new(b.id.clone()).clear_tags().add_tag("y"))
        .unwrap();

    let listed = api
        .list_posts(&ListOptions::default(), SortOrder::Title)
        .unwrap()
        .listed_posts;
    assert_eq!(titles(&listed), vec!["Alpha", "beta"]);
    assert_eq!(listed[1].tags, tags(&["y"]));

    let newest_first = api
        .list_posts(&ListOptions::default(), SortOrder::Modified)
        .unwrap()
        .listed_posts;
    assert_eq!(newest_first[0].title, "beta");
}
