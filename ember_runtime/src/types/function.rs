//! Native callable values.

use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use crate::object::Value;
use ember_core::{Frame, Raised};
use std::fmt;

/// Boxed native entry point for a function value.
pub type FunctionBody =
    Box<dyn Fn(&mut Frame, &[Value]) -> Result<Value, Raised> + Send + Sync>;

/// Callable backed by native code.
pub struct FunctionObject {
    name: &'static str,
    body: FunctionBody,
}

impl FunctionObject {
    /// Create a function payload from a name and native body.
    pub fn new<F>(name: &'static str, body: F) -> Self
    where
        F: Fn(&mut Frame, &[Value]) -> Result<Value, Raised> + Send + Sync + 'static,
    {
        Self {
            name,
            body: Box::new(body),
        }
    }

    /// Get the function's name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the native body.
    #[inline]
    pub fn invoke(&self, frame: &mut Frame, args: &[Value]) -> Result<Value, Raised> {
        (self.body)(frame, args)
    }
}

impl fmt::Debug for FunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionObject")
            .field("name", &self.name)
            .finish()
    }
}

/// Type descriptor for function.
pub static FUNCTION_TYPE: TypeObject = TypeObject {
    id: TypeId::FUNCTION,
    name: "function",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        call: Some(function_call),
        repr: Some(function_repr),
        ..TypeSlots::EMPTY
    },
};

fn expect_function<'a>(frame: &Frame, obj: &'a Value) -> Result<&'a FunctionObject, Raised> {
    match obj.as_function() {
        Some(func) => Ok(func),
        None => Err(frame.raise_type_error(format!(
            "function slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn function_call(frame: &mut Frame, obj: &Value, args: &[Value]) -> Result<Value, Raised> {
    let func = expect_function(frame, obj)?;
    func.invoke(frame, args)
}

fn function_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    let func = expect_function(frame, obj)?;
    Ok(format!("<function {}>", func.name()))
}
