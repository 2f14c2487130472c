// fragset-data/src/datasets/group_index_test.rs

use super::*;
use std::collections::HashSet;

// Five crops, origins [a, a, b, a, b], labels 1..=5, images are their row numbers.
fn sample_index() -> GroupIndex<&'static str, usize, i64> {
    GroupIndex::build(
        vec![0, 1, 2, 3, 4],
        vec![1, 2, 3, 4, 5],
        vec!["a", "a", "b", "a", "b"],
    )
    .unwrap()
}

fn fragment(image: usize, label: i64) -> Fragment<usize, i64> {
    Fragment { image, label }
}

#[test]
fn test_build_groups_by_origin() {
    let index = sample_index();
    assert_eq!(index.keys(), &["a", "b"]);
    assert_eq!(index.len(), 2);
    assert!(!index.is_empty());
    assert_eq!(
        index.members_of(&"a").unwrap(),
        &[fragment(0, 1), fragment(1, 2), fragment(3, 4)]
    );
    assert_eq!(index.members_of(&"b").unwrap(), &[fragment(2, 3), fragment(4, 5)]);
}

#[test]
fn test_build_every_record_in_exactly_one_group() {
    let keys: Vec<u32> = (0..200).map(|i| (i * 7919) % 13).collect();
    let index = GroupIndex::build((0..200).collect::<Vec<usize>>(), vec![0_u8; 200], keys.clone()).unwrap();

    assert_eq!(index.num_records(), 200);
    let mut seen = HashSet::new();
    for key in index.keys() {
        for member in index.members_of(key).unwrap() {
            assert_eq!(keys[member.image], *key, "record filed under the wrong origin");
            assert!(seen.insert(member.image), "record appears in two groups");
        }
    }
    assert_eq!(seen.len(), 200);

    let distinct: HashSet<u32> = keys.iter().copied().collect();
    let listed: HashSet<u32> = index.keys().iter().copied().collect();
    assert_eq!(listed, distinct);
    assert_eq!(index.keys().len(), distinct.len(), "key list has duplicates");
}

#[test]
fn test_build_first_encounter_order() {
    let index = GroupIndex::build(vec![(); 6], vec![0; 6], vec![9, 3, 9, 7, 3, 1]).unwrap();
    assert_eq!(index.keys(), &[9, 3, 7, 1]);
}

#[test]
fn test_build_is_deterministic() {
    let a = sample_index();
    let b = sample_index();
    assert_eq!(a.keys(), b.keys());
    for key in a.keys() {
        assert_eq!(a.members_of(key).unwrap(), b.members_of(key).unwrap());
    }
}

#[test]
fn test_build_empty() {
    let index: GroupIndex<String, u8, u8> = GroupIndex::build(vec![], vec![], vec![]).unwrap();
    assert_eq!(index.len(), 0);
    assert!(index.is_empty());
    assert_eq!(index.num_records(), 0);
}

#[test]
fn test_build_column_length_mismatch() {
    let err = GroupIndex::build(vec![0, 1, 2], vec![1, 2], vec!["a", "a", "b"]).unwrap_err();
    assert_eq!(
        err,
        FragsetError::ColumnLengthMismatch {
            column: CONTENT_LABEL_COLUMN.to_string(),
            expected: 3,
            actual: 2,
        }
    );

    let err = GroupIndex::build(vec![0, 1], vec![1, 2], vec!["a", "a", "b"]).unwrap_err();
    match err {
        FragsetError::ColumnLengthMismatch { column, expected, actual } => {
            assert_eq!(column, ORIGIN_KEY_COLUMN);
            assert_eq!(expected, 2);
            assert_eq!(actual, 3);
        }
        e => panic!("Expected ColumnLengthMismatch, got {:?}", e),
    }
}

#[test]
fn test_from_columns() {
    let columns = FragmentColumns::new(vec![10, 11], vec![0, 1], vec![b"x".to_vec(), b"x".to_vec()]);
    let index = GroupIndex::from_columns(columns).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.members_of(&b"x".to_vec()).unwrap().len(), 2);
}

#[test]
fn test_portion_one_is_noop() {
    let index = GroupIndex::build(vec![0; 4], vec![0; 4], vec!["d", "a", "c", "b"])
        .unwrap()
        .with_portion(1.0)
        .unwrap();
    assert_eq!(index.keys(), &["d", "a", "c", "b"]);
}

#[test]
fn test_portion_truncates_then_sorts() {
    let index = GroupIndex::build(vec![0; 4], vec![0; 4], vec!["d", "a", "c", "b"])
        .unwrap()
        .with_portion(0.5)
        .unwrap();
    assert_eq!(index.keys(), &["a", "d"]);
    assert_eq!(index.len(), 2);
}

#[test]
fn test_portion_length_law() {
    let keys: Vec<u32> = (0..37).rev().collect();
    for portion in [0.1, 0.25, 0.3, 0.5, 0.7, 0.99] {
        let index = GroupIndex::build(vec![(); 37], vec![(); 37], keys.clone())
            .unwrap()
            .with_portion(portion)
            .unwrap();
        assert_eq!(index.len(), (37.0 * portion).floor() as usize);
        assert!(index.keys().windows(2).all(|w| w[0] < w[1]), "keys not sorted ascending");
        // The kept keys are the leading ones in first-encounter order
        let kept: HashSet<u32> = index.keys().iter().copied().collect();
        let prefix: HashSet<u32> = keys[..index.len()].iter().copied().collect();
        assert_eq!(kept, prefix);
    }
}

#[test]
fn test_portion_byte_keys_sorted_lexicographically() {
    let keys = vec![b"zz".to_vec(), b"b".to_vec(), b"ab".to_vec(), b"q".to_vec()];
    let index = GroupIndex::build(vec![0; 4], vec![0; 4], keys)
        .unwrap()
        .with_portion(0.75)
        .unwrap();
    assert_eq!(index.keys(), &[b"ab".to_vec(), b"b".to_vec(), b"zz".to_vec()]);
}

#[test]
fn test_portion_can_empty_the_index() {
    let index = sample_index().with_portion(0.4).unwrap();
    assert_eq!(index.len(), 0);
    // Dropped groups stay allocated
    assert_eq!(index.num_records(), 5);
    assert!(index.members_of(&"a").is_ok());
}

#[test]
fn test_portion_invalid() {
    for bad in [0.0, -1.0, 1.5, f64::NAN] {
        assert!(matches!(
            sample_index().with_portion(bad),
            Err(FragsetError::InvalidPortion(_))
        ));
    }
}

#[test]
fn test_key_at() {
    let index = sample_index();
    assert_eq!(*index.key_at(0).unwrap(), "a");
    assert_eq!(*index.key_at(1).unwrap(), "b");
    match index.key_at(2) {
        Err(FragsetError::IndexOutOfBounds { index, shape }) => {
            assert_eq!(index, vec![2]);
            assert_eq!(shape, vec![2]);
        }
        other => panic!("Expected IndexOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_members_of_missing_key() {
    let index = sample_index();
    assert_eq!(
        index.members_of(&"zzz").unwrap_err(),
        FragsetError::MissingKey("\"zzz\"".to_string())
    );
}

#[test]
fn test_group_at() {
    let index = sample_index();
    let (key, members) = index.group_at(1).unwrap();
    assert_eq!(*key, "b");
    assert_eq!(members.len(), 2);
    assert!(index.group_at(5).is_err());
}
