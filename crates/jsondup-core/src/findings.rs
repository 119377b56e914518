//! 重复键计数与文档级合并
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::parser::ObjectLiteralKeys;
use crate::types::DuplicateFinding;

/// 文档级合并方式
/// - Flattened：同名键跨对象字面量合并为一条（与最初脚本的行为一致）
/// - PathScoped：每个对象字面量的发现单独保留，并标注 JSON Pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScope {
    #[default]
    #[serde(alias = "flat")]
    Flattened,
    #[serde(alias = "path")]
    PathScoped,
}

impl std::str::FromStr for KeyScope {
    type Err = ConfigError;

    /// 与配置文件走同一套 serde 规则，两处接受的取值保持一致
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let de: StrDeserializer<'_, ValueError> = s.into_deserializer();
        KeyScope::deserialize(de).map_err(|_| ConfigError::Value { field: "scope", value: s.to_string() })
    }
}

/// 统计单个对象字面量中出现 ≥2 次的键（按首次出现顺序）
pub(crate) fn count_duplicates(literal: &ObjectLiteralKeys) -> Vec<(&str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for k in &literal.keys {
        let c = counts.entry(k.as_str()).or_insert(0);
        if *c == 0 { order.push(k.as_str()); }
        *c += 1;
    }
    order
        .into_iter()
        .filter_map(|k| match counts[k] {
            n if n >= 2 => Some((k, n)),
            _ => None,
        })
        .collect()
}

/// 逐个对象字面量计数，再按 scope 合并为文档级结果
pub(crate) fn summarize(literals: &[ObjectLiteralKeys], scope: KeyScope) -> Vec<DuplicateFinding> {
    match scope {
        KeyScope::PathScoped => {
            // 重复键的值都是对象时，多个字面量共享同一个 Pointer，用序号区分
            let mut seen: HashMap<&str, usize> = HashMap::new();
            let mut out = Vec::new();
            for lit in literals {
                let instance = seen.entry(lit.path.as_str()).or_insert(0);
                *instance += 1;
                for (key, n) in count_duplicates(lit) {
                    out.push(DuplicateFinding {
                        key: key.to_string(),
                        occurrence_count: n,
                        objects: 1,
                        path: Some(lit.path.clone()),
                        instance: Some(*instance),
                    });
                }
            }
            out
        }
        KeyScope::Flattened => {
            let mut out: Vec<DuplicateFinding> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();
            for lit in literals {
                for (key, n) in count_duplicates(lit) {
                    match index.get(key) {
                        Some(&i) => {
                            let f = &mut out[i];
                            f.occurrence_count = f.occurrence_count.max(n);
                            f.objects += 1;
                        }
                        None => {
                            index.insert(key.to_string(), out.len());
                            out.push(DuplicateFinding { key: key.to_string(), occurrence_count: n, objects: 1, path: None, instance: None });
                        }
                    }
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(path: &str, keys: &[&str]) -> ObjectLiteralKeys {
        ObjectLiteralKeys { path: path.to_string(), keys: keys.iter().map(|k| k.to_string()).collect() }
    }

    #[test]
    fn distinct_keys_produce_nothing() {
        assert!(count_duplicates(&lit("", &["a", "b", "c"])).is_empty());
        assert!(count_duplicates(&lit("", &[])).is_empty());
    }

    #[test]
    fn counts_every_repeat_in_first_seen_order() {
        let l = lit("", &["b", "a", "b", "c", "a", "b"]);
        let got = count_duplicates(&l);
        assert_eq!(got, vec![("b", 3), ("a", 2)]);
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert!(count_duplicates(&lit("", &["Key", "key", "KEY"])).is_empty());
    }

    #[test]
    fn flattened_merges_same_key_across_literals() {
        let lits = vec![lit("", &["a", "a", "b"]), lit("/b", &["a", "a", "a", "x", "x"])];
        let got = summarize(&lits, KeyScope::Flattened);
        assert_eq!(
            got,
            vec![
                DuplicateFinding { key: "a".into(), occurrence_count: 3, objects: 2, path: None, instance: None },
                DuplicateFinding { key: "x".into(), occurrence_count: 2, objects: 1, path: None, instance: None },
            ]
        );
    }

    #[test]
    fn path_scoped_keeps_each_literal_apart() {
        let lits = vec![lit("", &["a", "a"]), lit("/b", &["a", "a", "a"])];
        let got = summarize(&lits, KeyScope::PathScoped);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].path.as_deref(), Some(""));
        assert_eq!(got[0].occurrence_count, 2);
        assert_eq!(got[1].path.as_deref(), Some("/b"));
        assert_eq!(got[1].occurrence_count, 3);
    }

    #[test]
    fn literals_sharing_a_pointer_are_numbered() {
        let lits = vec![lit("", &["a", "a"]), lit("/a", &["x", "x"]), lit("/a", &["x", "x", "x"])];
        let got = summarize(&lits, KeyScope::PathScoped);
        let tagged: Vec<(Option<&str>, Option<usize>, usize)> =
            got.iter().map(|f| (f.path.as_deref(), f.instance, f.occurrence_count)).collect();
        assert_eq!(tagged, vec![(Some(""), Some(1), 2), (Some("/a"), Some(1), 2), (Some("/a"), Some(2), 3)]);
    }

    #[test]
    fn scope_words_match_between_cli_and_config() {
        #[derive(Deserialize)]
        struct Wrap {
            scope: KeyScope,
        }
        for (word, want) in [
            ("flattened", KeyScope::Flattened),
            ("flat", KeyScope::Flattened),
            ("path", KeyScope::PathScoped),
            ("path_scoped", KeyScope::PathScoped),
        ] {
            assert_eq!(word.parse::<KeyScope>().unwrap(), want, "{word}");
            let w: Wrap = toml::from_str(&format!("scope = \"{word}\"")).unwrap();
            assert_eq!(w.scope, want, "{word}");
        }
        assert!("nested".parse::<KeyScope>().is_err());
        assert!(toml::from_str::<Wrap>("scope = \"nested\"").is_err());
    }
}
