//! LabelGenerator：为绑定参数生成唯一 label（`:bind<n>`）。
//!
//! 一棵语句树里的所有语句必须共用同一个生成器，否则子语句合并到父语句时 label 可能冲突。

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 生成的 label 统一使用的前缀（`:` 同时也是 quoting 跳过的绑定标记字符）。
pub const LABEL_PREFIX: &str = ":bind";

static GLOBAL_LABEL_SEQ: AtomicU64 = AtomicU64::new(0);

/// label 来源。
///
/// - `Global`：进程级原子计数器，进程生命周期内唯一（默认）。
/// - `Sequence`：共享的本地计数器，clone 后仍指向同一个计数，便于测试得到确定的 label。
#[derive(Debug, Clone, Default)]
pub enum LabelGenerator {
    #[default]
    Global,
    Sequence(Rc<Cell<u64>>),
}

impl LabelGenerator {
    /// 创建一个从 1 开始计数的独立序列。
    pub fn sequence() -> Self {
        Self::Sequence(Rc::new(Cell::new(0)))
    }

    pub fn next_label(&self) -> String {
        let n = match self {
            Self::Global => GLOBAL_LABEL_SEQ.fetch_add(1, Ordering::Relaxed) + 1,
            Self::Sequence(seq) => {
                let n = seq.get() + 1;
                seq.set(n);
                n
            }
        };
        format!("{LABEL_PREFIX}{n}")
    }
}
