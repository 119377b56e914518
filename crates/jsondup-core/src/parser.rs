//! 解析钩子：基于 serde_json 的自定义 Visitor
//!
//! 普通反序列化到 Map 会按“后者覆盖前者”折叠重复键，重复信息在此之前就已丢失。
//! 这里用 `DeserializeSeed` 遍历整棵值树，`visit_map` 按源码顺序拿到每个对象字面量的全部键（含重复），
//! 值本身不保留，只记录键序列与对象所在路径。
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

use crate::error::DocumentError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 开启 `arbitrary_precision` 后，serde_json 把数字包装成以此为唯一键的单键 Map 交给 Visitor，
/// 数字不再先转换为 f64，因此超出 f64 范围的数字（如 `1e400`）也能正常解析
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// 一个对象字面量的键序列（源码顺序，含重复）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ObjectLiteralKeys {
    /// 该对象的 JSON Pointer（根为空串）
    pub(crate) path: String,
    pub(crate) keys: Vec<String>,
}

/// 解析整个文档，按对象字面量的开启顺序返回键序列
pub(crate) fn collect_object_literals(input: &[u8]) -> Result<Vec<ObjectLiteralKeys>, DocumentError> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let mut literals = Vec::new();
    let mut de = serde_json::Deserializer::from_slice(input);
    NodeSeed { path: String::new(), sink: &mut literals }.deserialize(&mut de)?;
    // 顶层值之后只允许空白
    de.end()?;
    Ok(literals)
}

/// 访问任意 JSON 值；`path` 为该值的 JSON Pointer
struct NodeSeed<'s> {
    path: String,
    sink: &'s mut Vec<ObjectLiteralKeys>,
}

impl<'de, 's> DeserializeSeed<'de> for NodeSeed<'s> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 's> Visitor<'de> for NodeSeed<'s> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> { Ok(()) }
    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> { Ok(()) }
    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> { Ok(()) }
    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> { Ok(()) }
    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> { Ok(()) }
    fn visit_unit<E: de::Error>(self) -> Result<(), E> { Ok(()) }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut idx = 0usize;
        while seq
            .next_element_seed(NodeSeed { path: child_path(&self.path, &idx.to_string()), sink: &mut *self.sink })?
            .is_some()
        {
            idx += 1;
        }
        Ok(())
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let first = match map.next_key::<String>()? {
            Some(k) if k == NUMBER_TOKEN => {
                map.next_value::<de::IgnoredAny>()?;
                return Ok(());
            }
            first => first,
        };

        // 在读取第一个值之前预留槽位，保证输出按对象开启（源码）顺序，而不是闭合顺序
        let slot = self.sink.len();
        self.sink.push(ObjectLiteralKeys { path: self.path.clone(), keys: Vec::new() });

        let mut keys = Vec::new();
        let mut next = first;
        while let Some(key) = next {
            map.next_value_seed(NodeSeed { path: child_path(&self.path, &key), sink: &mut *self.sink })?;
            keys.push(key);
            next = map.next_key::<String>()?;
        }
        self.sink[slot].keys = keys;
        Ok(())
    }
}

/// RFC 6901：`~` → `~0`，`/` → `~1`
fn child_path(parent: &str, token: &str) -> String {
    let mut p = String::with_capacity(parent.len() + token.len() + 1);
    p.push_str(parent);
    p.push('/');
    for ch in token.chars() {
        match ch {
            '~' => p.push_str("~0"),
            '/' => p.push_str("~1"),
            c => p.push(c),
        }
    }
    p
}
