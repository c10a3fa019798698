//! 按路径回写：在文档副本上替换指定位置的值

use serde_json::Value;
use thiserror::Error;

use crate::model::node::NodeKind;
use crate::model::path::{format_path, PathSegment};

/// 路径在当前文档中无法解析（选中节点相对文档已过期）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("{at} 处不存在键 \"{key}\"")]
    MissingKey { at: String, key: String },
    #[error("{at} 处下标 {index} 越界（长度 {len}）")]
    IndexOutOfRange { at: String, index: usize, len: usize },
    #[error("{at} 处的值不是容器（{found}）")]
    NotAContainer { at: String, found: &'static str },
    #[error("{at} 处的 {found} 不能用路径段 {segment} 访问")]
    SegmentMismatch { at: String, segment: String, found: &'static str },
}

/// 返回一份新文档：`path` 处的值被替换为 `new_value`，原文档不被修改
///
/// 空路径表示替换根。中间段必须指向已存在的容器；
/// 末段为对象键时可新增字段，为数组下标时可等于长度（追加）。
pub fn update_at_path(document: &Value, path: &[PathSegment], new_value: Value) -> Result<Value, TraversalError> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(new_value);
    };

    let mut updated = document.clone();
    let mut current = &mut updated;
    for (depth, segment) in parents.iter().enumerate() {
        current = descend_mut(current, segment, &path[..depth])?;
    }
    assign(current, last, new_value, parents)?;
    Ok(updated)
}

/// 读取 `path` 处的值
pub fn value_at_path<'a>(document: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(document, |current, segment| match (current, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    })
}

fn descend_mut<'a>(current: &'a mut Value, segment: &PathSegment, at: &[PathSegment]) -> Result<&'a mut Value, TraversalError> {
    match (current, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get_mut(key).ok_or_else(|| TraversalError::MissingKey {
            at: format_path(at),
            key: key.clone(),
        }),
        (Value::Array(items), PathSegment::Index(index)) => {
            let len = items.len();
            items.get_mut(*index).ok_or_else(|| TraversalError::IndexOutOfRange {
                at: format_path(at),
                index: *index,
                len,
            })
        }
        (other, segment) => Err(unreachable_segment(other, segment, at)),
    }
}

fn assign(parent: &mut Value, segment: &PathSegment, value: Value, at: &[PathSegment]) -> Result<(), TraversalError> {
    match (parent, segment) {
        (Value::Object(map), PathSegment::Key(key)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            let len = items.len();
            if let Some(slot) = items.get_mut(*index) {
                *slot = value;
                Ok(())
            } else if *index == len {
                items.push(value);
                Ok(())
            } else {
                Err(TraversalError::IndexOutOfRange { at: format_path(at), index: *index, len })
            }
        }
        (other, segment) => Err(unreachable_segment(other, segment, at)),
    }
}

fn unreachable_segment(value: &Value, segment: &PathSegment, at: &[PathSegment]) -> TraversalError {
    let kind = NodeKind::of(value);
    if kind.is_container() {
        TraversalError::SegmentMismatch {
            at: format_path(at),
            segment: segment.to_string(),
            found: kind.as_str(),
        }
    } else {
        TraversalError::NotAContainer { at: format_path(at), found: kind.as_str() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::path::JsonPath;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "customer": {"name": "Ann", "age": 30},
            "orders": [{"id": 1, "items": ["a", "b"]}, {"id": 2, "items": []}],
            "active": true
        })
    }

    #[test]
    fn test_root_replacement() {
        let doc = sample();
        let updated = update_at_path(&doc, &[], json!([1, 2, 3])).unwrap();
        assert_eq!(updated, json!([1, 2, 3]));
        assert_eq!(doc, sample(), "原文档不应被修改");
    }

    #[test]
    fn test_update_nested_object() {
        let doc = sample();
        let path: JsonPath = vec!["customer".into()];
        let new_value = json!({"name": "Ann", "age": 31});
        let updated = update_at_path(&doc, &path, new_value.clone()).unwrap();

        assert_eq!(value_at_path(&updated, &path), Some(&new_value));
        assert_eq!(updated["orders"], doc["orders"], "兄弟结构应保持不变");
        assert_eq!(doc["customer"]["age"], json!(30), "原文档不应被修改");
    }

    #[test]
    fn test_update_array_element() {
        let doc = sample();
        let path: JsonPath = vec!["orders".into(), 0.into(), "items".into(), 1.into()];
        let updated = update_at_path(&doc, &path, json!("z")).unwrap();
        assert_eq!(updated["orders"][0]["items"], json!(["a", "z"]));
        assert_eq!(doc["orders"][0]["items"], json!(["a", "b"]));
    }

    #[test]
    fn test_key_order_kept_on_replace() {
        let doc = json!({"first": 1, "second": 2, "third": 3});
        let updated = update_at_path(&doc, &["second".into()], json!("two")).unwrap();
        let keys: Vec<&String> = updated.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["first", "second", "third"]);
    }

    #[test]
    fn test_final_key_may_be_new() {
        let doc = sample();
        let updated = update_at_path(&doc, &["customer".into(), "email".into()], json!("ann@example.com")).unwrap();
        assert_eq!(updated["customer"]["email"], json!("ann@example.com"));
    }

    #[test]
    fn test_final_index_may_append() {
        let doc = sample();
        let updated = update_at_path(&doc, &["orders".into(), 1.into(), "items".into(), 0.into()], json!("x")).unwrap();
        assert_eq!(updated["orders"][1]["items"], json!(["x"]));
    }

    #[test]
    fn test_missing_intermediate_key() {
        let doc = sample();
        let path: JsonPath = vec!["supplier".into(), "name".into()];
        let err = update_at_path(&doc, &path, json!("x")).unwrap_err();
        assert_eq!(err, TraversalError::MissingKey { at: "$".into(), key: "supplier".into() });
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_intermediate_index_out_of_range() {
        let doc = sample();
        let path: JsonPath = vec!["orders".into(), 5.into(), "id".into()];
        let err = update_at_path(&doc, &path, json!(9)).unwrap_err();
        assert_eq!(err, TraversalError::IndexOutOfRange { at: r#"$["orders"]"#.into(), index: 5, len: 2 });
    }

    #[test]
    fn test_final_index_past_end() {
        let doc = sample();
        let path: JsonPath = vec!["orders".into(), 3.into()];
        let err = update_at_path(&doc, &path, json!({})).unwrap_err();
        assert!(matches!(err, TraversalError::IndexOutOfRange { index: 3, len: 2, .. }));
    }

    #[test]
    fn test_descend_into_scalar() {
        let doc = sample();
        let path: JsonPath = vec!["active".into(), "flag".into()];
        let err = update_at_path(&doc, &path, json!(1)).unwrap_err();
        assert_eq!(err, TraversalError::NotAContainer { at: r#"$["active"]"#.into(), found: "boolean" });
    }

    #[test]
    fn test_segment_kind_mismatch() {
        let doc = sample();
        let err = update_at_path(&doc, &["customer".into(), 0.into()], json!(1)).unwrap_err();
        assert!(matches!(err, TraversalError::SegmentMismatch { found: "object", .. }));

        let err = update_at_path(&doc, &["orders".into(), "id".into(), "x".into()], json!(1)).unwrap_err();
        assert!(matches!(err, TraversalError::SegmentMismatch { found: "array", .. }));
    }

    #[test]
    fn test_value_at_path() {
        let doc = sample();
        assert_eq!(value_at_path(&doc, &[]), Some(&doc));
        assert_eq!(value_at_path(&doc, &["orders".into(), 1.into(), "id".into()]), Some(&json!(2)));
        assert_eq!(value_at_path(&doc, &["orders".into(), 9.into()]), None);
        assert_eq!(value_at_path(&doc, &["active".into(), "x".into()]), None);
    }

    #[test]
    fn test_error_message_names_location() {
        let err = update_at_path(&sample(), &["customer".into(), "address".into(), "city".into()], json!("x")).unwrap_err();
        assert_eq!(err.to_string(), r#"$["customer"] 处不存在键 "address""#);
    }
}
