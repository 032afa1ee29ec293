//! Integration tests for the hid-preparsed crate.
//!
//! Covers JSON descriptor documents, hierarchy helpers and the error surface
//! seen by a descriptor decoder handing over raw tables.

use hid_preparsed::{
    Collection, CollectionKind, DescriptorSpec, PREPARSED_FORMAT_TAG, PreparsedDescriptor,
    ReportItem, ReportItemSpec, ReportKind, StoreError, UsageDescriptor,
};

const DUAL_STICK_JSON: &str = r#"{
    "collections": [
        { "kind": "application" },
        { "kind": "physical", "parent": 0 },
        { "kind": "physical", "parent": 0 },
        { "kind": "logical", "parent": 2 }
    ],
    "report_items": [
        {
            "report_kind": "input",
            "usage_page": 1,
            "usage": { "single": 48 },
            "parent_collection": 1
        },
        {
            "report_kind": "input",
            "usage_page": 1,
            "usage": { "single": 48 },
            "parent_collection": 2,
            "report_id": 2
        },
        {
            "report_kind": "input",
            "usage_page": 9,
            "usage": { "range": { "minimum": 1, "maximum": 16 } },
            "parent_collection": 3,
            "is_variable": false
        }
    ]
}"#;

// ---------------------------------------------------------------------------
// JSON documents
// ---------------------------------------------------------------------------

#[test]
fn json_document_builds_valid_store() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json(DUAL_STICK_JSON)?;
    assert!(store.is_valid());
    assert_eq!(store.format_tag(), PREPARSED_FORMAT_TAG);
    assert_eq!(store.collection_count(), 4);
    assert_eq!(store.report_item_count(), 3);
    Ok(())
}

#[test]
fn json_defaults_apply() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json(DUAL_STICK_JSON)?;
    let first = store.report_item(0).ok_or(StoreError::DanglingParent {
        item: 0,
        parent: 0,
        collection_count: 0,
    })?;
    assert!(first.is_variable);
    assert_eq!(first.report_id, 0);

    let buttons = store.report_item(2).ok_or(StoreError::DanglingParent {
        item: 2,
        parent: 0,
        collection_count: 0,
    })?;
    assert!(!buttons.is_variable);
    assert_eq!(store.usage_of(buttons), Some(&UsageDescriptor::range(1, 16)));
    Ok(())
}

#[test]
fn json_export_reloads_to_equal_store() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json(DUAL_STICK_JSON)?;
    let reloaded = PreparsedDescriptor::from_json(&store.to_json()?)?;
    assert_eq!(store, reloaded);
    Ok(())
}

#[test]
fn json_with_dangling_parent_is_rejected() {
    let json = r#"{
        "collections": [{ "kind": "application" }],
        "report_items": [
            {
                "report_kind": "feature",
                "usage_page": 1,
                "usage": { "single": 1 },
                "parent_collection": 3
            }
        ]
    }"#;
    let result = PreparsedDescriptor::from_json(json);
    assert!(matches!(result, Err(StoreError::DanglingParent { parent: 3, .. })));
}

#[test]
fn malformed_json_is_json_error() {
    let result = PreparsedDescriptor::from_json("{ \"collections\": 7 }");
    assert!(matches!(result, Err(StoreError::Json(_))));
}

#[test]
fn empty_document_is_empty_store() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json("{}")?;
    assert_eq!(store.collection_count(), 0);
    assert_eq!(DescriptorSpec::try_from(&store)?, DescriptorSpec::default());
    Ok(())
}

// ---------------------------------------------------------------------------
// Hierarchy helpers
// ---------------------------------------------------------------------------

#[test]
fn children_lists_direct_descendants_only() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json(DUAL_STICK_JSON)?;
    assert_eq!(store.children(0), vec![1, 2]);
    assert_eq!(store.children(2), vec![3]);
    assert!(store.children(3).is_empty());
    assert!(store.children(99).is_empty());
    Ok(())
}

#[test]
fn ancestors_walk_to_top_level() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json(DUAL_STICK_JSON)?;
    assert_eq!(store.ancestors(3), vec![2, 0]);
    assert!(store.ancestors(0).is_empty());
    Ok(())
}

#[test]
fn items_in_follows_adjacency() -> Result<(), StoreError> {
    let store = PreparsedDescriptor::from_json(DUAL_STICK_JSON)?;
    let owned: Vec<usize> = store.items_in(2).map(|(index, _)| index).collect();
    assert_eq!(owned, vec![1]);
    assert_eq!(store.items_in(0).count(), 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// Raw tables from a decoder
// ---------------------------------------------------------------------------

#[test]
fn raw_parts_keep_foreign_tag() {
    let store = PreparsedDescriptor::from_raw_parts(
        0x1234_5678,
        vec![Collection::new(CollectionKind::Application, None)],
        Vec::new(),
        Vec::new(),
    );
    assert!(!store.is_valid());
    assert!(matches!(
        store.to_json(),
        Err(StoreError::ForeignFormatTag { found: 0x1234_5678 })
    ));
}

#[test]
fn raw_parts_ignore_stale_adjacency() {
    let mut collection = Collection::new(CollectionKind::Application, None);
    let seeded = PreparsedDescriptor::from_raw_parts(
        PREPARSED_FORMAT_TAG,
        vec![collection.clone()],
        vec![ReportItem {
            report_kind: ReportKind::Output,
            usage_page: 0x08,
            parent_collection: 0,
            first_usage_descriptor: 0,
            is_variable: true,
            report_id: 1,
        }],
        vec![UsageDescriptor::Single(0x01)],
    );
    if let Some(owned) = seeded.collection(0) {
        collection = owned.clone();
    }

    // Reusing a collection that already lists an item must not duplicate it.
    let store = PreparsedDescriptor::from_raw_parts(
        PREPARSED_FORMAT_TAG,
        vec![collection],
        Vec::new(),
        Vec::new(),
    );
    assert!(store.collection(0).is_some_and(|c| c.report_items().is_empty()));
}

#[test]
fn builder_matches_json_document() -> Result<(), StoreError> {
    let mut builder = PreparsedDescriptor::builder();
    let app = builder.add_collection(CollectionKind::Application, None);
    let left = builder.add_collection(CollectionKind::Physical, Some(app));
    let right = builder.add_collection(CollectionKind::Physical, Some(app));
    let hat = builder.add_collection(CollectionKind::Logical, Some(right));
    builder.add_report_item(ReportItemSpec::variable(ReportKind::Input, 1, 48, left));
    builder.add_report_item(
        ReportItemSpec::variable(ReportKind::Input, 1, 48, right).with_report_id(2),
    );
    builder.add_report_item(
        ReportItemSpec::variable(ReportKind::Input, 9, 0, hat)
            .with_usage(UsageDescriptor::range(1, 16))
            .array(),
    );

    assert_eq!(builder.build()?, PreparsedDescriptor::from_json(DUAL_STICK_JSON)?);
    Ok(())
}

#[test]
fn json_export_layout() -> Result<(), StoreError> {
    let mut builder = PreparsedDescriptor::builder();
    let app = builder.add_collection(CollectionKind::Application, None);
    builder.add_report_item(ReportItemSpec::variable(ReportKind::Input, 1, 48, app));

    insta::assert_snapshot!(builder.build()?.to_json()?, @r#"
    {
      "collections": [
        {
          "kind": "application",
          "parent": null
        }
      ],
      "report_items": [
        {
          "report_kind": "input",
          "usage_page": 1,
          "usage": {
            "single": 48
          },
          "parent_collection": 0,
          "is_variable": true,
          "report_id": 0
        }
      ]
    }
    "#);
    Ok(())
}
