//! SQL Flavor（方言）：控制标识符引号、关键字集合以及 RETURNING / RECURSIVE 等能力。

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 支持的两种方言族。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
}

static DEFAULT_FLAVOR: AtomicU8 = AtomicU8::new(Flavor::MySQL as u8);
static DEFAULT_FLAVOR_LOCK: Mutex<()> = Mutex::new(());

/// 两种方言共享的关键字（大小写不敏感匹配，匹配到的 token 不加引号）。
const COMMON_KEYWORDS: &[&str] = &[
    "ALL",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "AVG",
    "BETWEEN",
    "BY",
    "CASE",
    "CAST",
    "COALESCE",
    "COUNT",
    "CROSS",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DEFAULT",
    "DESC",
    "DISTINCT",
    "ELSE",
    "END",
    "EXISTS",
    "FALSE",
    "FIRST",
    "FROM",
    "FULL",
    "IN",
    "INNER",
    "INTERVAL",
    "IS",
    "JOIN",
    "LAST",
    "LEFT",
    "LIKE",
    "LOWER",
    "MAX",
    "MIN",
    "NATURAL",
    "NOT",
    "NOW",
    "NULL",
    "NULLS",
    "ON",
    "OR",
    "OUTER",
    "RIGHT",
    "SELECT",
    "SOME",
    "SUM",
    "THEN",
    "TRUE",
    "UNION",
    "UPPER",
    "USING",
    "WHEN",
    "WHERE",
];

const MYSQL_KEYWORDS: &[&str] = &[
    "BINARY", "CONCAT", "DIV", "IFNULL", "MOD", "REGEXP", "RLIKE", "XOR",
];

const POSTGRES_KEYWORDS: &[&str] = &[
    "ARRAY",
    "ILIKE",
    "RETURNING",
    "SIMILAR",
    "STRING_AGG",
    "TO",
];

impl Flavor {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::PostgreSQL,
            _ => Self::MySQL,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    /// 字段标识符的左右引号。
    pub fn field_quotes(self) -> (char, char) {
        match self {
            Self::MySQL => ('`', '`'),
            Self::PostgreSQL => ('"', '"'),
        }
    }

    /// 表名标识符的左右引号。
    pub fn table_quotes(self) -> (char, char) {
        match self {
            Self::MySQL => ('`', '`'),
            Self::PostgreSQL => ('"', '"'),
        }
    }

    /// INSERT/UPDATE/DELETE 是否支持 `RETURNING`。
    pub fn supports_returning(self) -> bool {
        matches!(self, Self::PostgreSQL)
    }

    /// WITH 是否支持递归成员。
    pub fn supports_recursive(self) -> bool {
        matches!(self, Self::PostgreSQL)
    }

    /// 该方言的关键字判断（共享集合 + 方言扩展）。
    pub fn is_keyword(self, token: &str) -> bool {
        let extra = match self {
            Self::MySQL => MYSQL_KEYWORDS,
            Self::PostgreSQL => POSTGRES_KEYWORDS,
        };
        COMMON_KEYWORDS
            .iter()
            .chain(extra.iter())
            .any(|k| k.eq_ignore_ascii_case(token))
    }
}

/// 获取当前全局默认 Flavor。
pub fn default_flavor() -> Flavor {
    Flavor::from_u8(DEFAULT_FLAVOR.load(Ordering::Relaxed))
}

/// 设置全局默认 Flavor，返回旧值。
pub fn set_default_flavor(flavor: Flavor) -> Flavor {
    let old = DEFAULT_FLAVOR.swap(flavor.to_u8(), Ordering::Relaxed);
    Flavor::from_u8(old)
}

/// 修改全局默认 Flavor 的 RAII guard（会持有一个全局锁，避免并行测试互相干扰）。
pub struct DefaultFlavorGuard {
    _lock: MutexGuard<'static, ()>,
    old: Flavor,
}

impl Drop for DefaultFlavorGuard {
    fn drop(&mut self) {
        set_default_flavor(self.old);
    }
}

/// 在一个作用域内临时设置 DefaultFlavor，并保证退出作用域后自动恢复。
pub fn set_default_flavor_scoped(flavor: Flavor) -> DefaultFlavorGuard {
    let lock = DEFAULT_FLAVOR_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_flavor(flavor);
    DefaultFlavorGuard { _lock: lock, old }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
        };
        f.write_str(s)
    }
}

/// 方言查找失败：整个库里唯一会返回的错误。
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DialectError {
    #[error("unknown sql dialect `{0}`")]
    UnknownDialect(String),
}

impl FromStr for Flavor {
    type Err = DialectError;

    /// 大小写不敏感地解析方言名。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySQL),
            "pgsql" | "postgres" | "postgresql" => Ok(Self::PostgreSQL),
            _ => Err(DialectError::UnknownDialect(s.to_string())),
        }
    }
}
