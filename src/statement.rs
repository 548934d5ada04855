//! Statement：所有语句（Select/Insert/Update/Delete/Union/With）共享的渲染接口。

use crate::bindings::Bindings;
use crate::flavor::Flavor;
use dyn_clone::DynClone;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 可嵌套渲染的 SQL 语句。
///
/// `render` 返回以换行结尾的完整文本；`bindings` 返回合并了所有嵌套语句后的最终绑定表。
/// 两者每次调用都按当前状态重新计算，不做快照。
pub trait Statement: DynClone + fmt::Debug {
    fn render(&self) -> String;

    fn bindings(&self) -> Bindings;

    fn flavor(&self) -> Flavor;
}

dyn_clone::clone_trait_object!(Statement);

impl Statement for Box<dyn Statement> {
    fn render(&self) -> String {
        (**self).render()
    }

    fn bindings(&self) -> Bindings {
        (**self).bindings()
    }

    fn flavor(&self) -> Flavor {
        (**self).flavor()
    }
}

/// SharedStatement：把 `Rc<RefCell<T>>` 包装成 `Statement`，用于按引用嵌入子语句。
///
/// 按值嵌入的语句会被复制一份；通过 `SharedStatement` 嵌入时，原语句在父语句渲染之前的
/// 任何修改都会反映到父语句的输出中（late-binding）。
pub struct SharedStatement<T: Statement> {
    inner: Rc<RefCell<T>>,
}

impl<T: Statement> Clone for SharedStatement<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Statement> fmt::Debug for SharedStatement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStatement")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T: Statement> SharedStatement<T> {
    pub fn new(inner: Rc<RefCell<T>>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> Rc<RefCell<T>> {
        self.inner.clone()
    }
}

impl<T: Statement + 'static> Statement for SharedStatement<T> {
    fn render(&self) -> String {
        self.inner.borrow().render()
    }

    fn bindings(&self) -> Bindings {
        self.inner.borrow().bindings()
    }

    fn flavor(&self) -> Flavor {
        self.inner.borrow().flavor()
    }
}

/// 便捷函数：`shared(rc.clone())` 得到可嵌入的共享语句。
pub fn shared<T: Statement>(inner: Rc<RefCell<T>>) -> SharedStatement<T> {
    SharedStatement::new(inner)
}
