//! Python bindings (`python` feature)
//!
//! Exposes `SortedSet` and `HashSet` with `length` and `__len__`, both
//! backed by the same cardinality accessor the host runtime binds.

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyString};

use crate::binding::cardinality;
use crate::sets::{Element, HashSet, SetVariant, SortedSet};

impl<'source> FromPyObject<'source> for Element {
    fn extract(ob: &'source PyAny) -> PyResult<Self> {
        if ob.is_none() {
            return Ok(Element::Nil);
        }
        // bool before int: Python bools are ints
        if let Ok(b) = ob.downcast::<PyBool>() {
            return Ok(Element::Bool(b.is_true()));
        }
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Element::from(s.to_str()?));
        }
        if let Ok(n) = ob.extract::<i64>() {
            return Ok(Element::from(n));
        }

        Err(PyTypeError::new_err(format!(
            "unsupported set element of type {}",
            ob.get_type().name()?
        )))
    }
}

fn collect<T: SetVariant>(items: Option<&PyAny>) -> PyResult<T> {
    let mut set = T::default();
    if let Some(items) = items {
        for item in items.iter()? {
            set.insert(item?.extract()?);
        }
    }
    Ok(set)
}

macro_rules! py_set_class {
    ($py_name:ident, $inner:ty, $name:literal) => {
        #[pyclass(name = $name, module = "lovely_sets")]
        pub struct $py_name {
            inner: $inner,
        }

        #[pymethods]
        impl $py_name {
            #[new]
            #[pyo3(signature = (items = None))]
            fn new(items: Option<&PyAny>) -> PyResult<Self> {
                Ok(Self {
                    inner: collect::<$inner>(items)?,
                })
            }

            fn add(&mut self, item: Element) -> bool {
                self.inner.insert(item)
            }

            fn length(&self) -> usize {
                cardinality(&self.inner)
            }

            fn __len__(&self) -> usize {
                cardinality(&self.inner)
            }
        }
    };
}

py_set_class!(PySortedSet, SortedSet, "SortedSet");
py_set_class!(PyHashSet, HashSet, "HashSet");

#[pymodule]
fn lovely_sets(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PySortedSet>()?;
    m.add_class::<PyHashSet>()?;
    Ok(())
}
