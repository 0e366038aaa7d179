//! 页面内容编辑模型的集成测试

use linky::content::{
    BlockField, BlockKind, ContentBlock, ContentError, ContentList, EditorSession, SessionState,
    SlugStatus, deserialize_content, serialize_content, validate_field,
};

fn sample_list() -> ContentList {
    ContentList::from_blocks(vec![
        ContentBlock::title_block("A"),
        ContentBlock::link_block("B", "https://b.example.com"),
        ContentBlock::title_block("C"),
        ContentBlock::link_block("D", "https://d.example.com"),
    ])
}

fn titles(list: &ContentList) -> Vec<&str> {
    list.blocks().map(|b| b.title()).collect()
}

#[test]
fn test_structural_edits_keep_errors_aligned() {
    let mut session = EditorSession::new();
    session.load(Some(sample_list())).unwrap();

    session.on_field_change(1, BlockField::Url, "broken").unwrap();
    let index = session.add_block(BlockKind::Link).unwrap();
    assert_eq!(index, 4);
    session.reorder(1, 3).unwrap();
    session.delete_block(0).unwrap();

    let content = session.content();
    assert_eq!(content.len(), 4);
    assert_eq!(content.entries().len(), content.blocks().count());
    // 出错的 B 跟着移动到了新位置
    let broken = content
        .entries()
        .iter()
        .find(|e| e.block.title() == "B")
        .unwrap();
    assert_eq!(broken.errors.get(BlockField::Url), Some("Invalid URL"));
}

#[test]
fn test_move_uses_splice_semantics() {
    let mut session = EditorSession::new();
    session.load(Some(sample_list())).unwrap();
    session.on_field_change(0, BlockField::Title, "").unwrap();

    session.reorder(0, 2).unwrap();

    let content = session.content();
    assert_eq!(titles(content), vec!["B", "C", "", "D"]);
    assert!(content.get(0).unwrap().errors.is_empty());
    assert_eq!(
        content.get(2).unwrap().errors.get(BlockField::Title),
        Some("Title must not be empty")
    );
}

#[test]
fn test_submit_reports_every_violation() {
    let mut session = EditorSession::new();
    session
        .load(Some(ContentList::from_blocks(vec![
            ContentBlock::title_block(""),
            ContentBlock::link_block("Site", "not-a-url"),
            ContentBlock::link_block("Ok", "https://ok.example.com"),
        ])))
        .unwrap();

    let err = session.submit().unwrap_err();
    match err {
        ContentError::Validation(list) => {
            assert_eq!(list.len(), 2);
            assert_eq!(list.violations[0].index, 0);
            assert_eq!(list.violations[0].field, BlockField::Title);
            assert_eq!(list.violations[1].index, 1);
            assert_eq!(list.violations[1].field, BlockField::Url);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(session.state(), SessionState::ValidationFailed);
    let content = session.content();
    assert!(content.get(0).unwrap().errors.get(BlockField::Title).is_some());
    assert!(content.get(1).unwrap().errors.get(BlockField::Url).is_some());
    assert!(content.get(2).unwrap().errors.is_empty());

    // 修正后可以再次提交
    session.on_field_change(0, BlockField::Title, "Hello").unwrap();
    session
        .on_field_change(1, BlockField::Url, "https://site.example.com")
        .unwrap();
    assert!(session.submit().is_ok());
    assert_eq!(session.state(), SessionState::Submitted);
}

#[test]
fn test_serialization_round_trip() {
    let list = sample_list();
    let serialized = serialize_content(&list).unwrap();
    let restored = deserialize_content(serialized.as_str()).unwrap();
    assert_eq!(restored, list);
}

#[test]
fn test_field_validation_examples() {
    assert!(validate_field(BlockKind::Link, BlockField::Url, "not-a-url").is_some());
    assert!(validate_field(BlockKind::Link, BlockField::Url, "https://x.co").is_none());
    assert!(validate_field(BlockKind::Title, BlockField::Title, "").is_some());
    assert!(validate_field(BlockKind::Title, BlockField::Title, "A").is_none());
}

#[test]
fn test_only_latest_slug_check_wins() {
    for latest_first in [true, false] {
        let mut session = EditorSession::new();
        session.load(None).unwrap();

        let first = session.check_slug("abc");
        let second = session.check_slug("abcd");
        assert_eq!(session.slug_status(), SlugStatus::Pending);

        if latest_first {
            assert!(session.apply_slug_check(&second, Ok::<bool, ()>(true)));
            assert!(!session.apply_slug_check(&first, Ok::<bool, ()>(false)));
        } else {
            assert!(!session.apply_slug_check(&first, Ok::<bool, ()>(false)));
            assert!(session.apply_slug_check(&second, Ok::<bool, ()>(true)));
        }
        assert_eq!(session.slug_status(), SlugStatus::Available);
    }
}

#[test]
fn test_move_to_same_index_is_noop() {
    let mut session = EditorSession::new();
    session.load(Some(sample_list())).unwrap();
    session.on_field_change(2, BlockField::Title, "").unwrap();
    let before = session.content().clone();
    let state = session.state();

    session.reorder(2, 2).unwrap();

    assert_eq!(session.content(), &before);
    assert_eq!(session.state(), state);
}

#[test]
fn test_legacy_untagged_content_is_accepted() {
    let list = deserialize_content(
        r#"[{"title":"Welcome"},{"title":"Docs","url":"https://docs.rs"}]"#,
    )
    .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(0).unwrap().block.kind(), BlockKind::Title);
    assert_eq!(list.get(1).unwrap().block.url(), Some("https://docs.rs"));
    assert!(!list.get(0).unwrap().block.id().is_empty());
}
