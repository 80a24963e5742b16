//! The scripted-module seam
//!
//! Archives bundle their model as a serialized TorchScript module. Both the
//! deserialization of that module and every tensor operation it performs
//! happen inside libtorch; this module only shuttles named values across
//! the boundary.

use modelshelf_core::{Error, Result};
use std::path::Path;
use tch::{CModule, Device, IValue, Tensor};
use tracing::debug;

/// A loaded TorchScript module
pub struct ScriptedModule {
    module: CModule,
}

impl ScriptedModule {
    /// Deserialize a module from an archive's weights file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scripted module");

        let mut module = CModule::load_on_device(path, Device::Cpu).map_err(|e| {
            Error::archive(format!(
                "failed to deserialize module {}: {}",
                path.display(),
                e
            ))
        })?;
        module.set_eval();
        Ok(Self { module })
    }

    /// Run the module's forward method on named inputs
    pub fn run(&self, inputs: Vec<(String, IValue)>) -> Result<Outputs> {
        let dict = IValue::GenericDict(
            inputs
                .into_iter()
                .map(|(name, value)| (IValue::String(name), value))
                .collect(),
        );

        let output = tch::no_grad(|| self.module.forward_is(&[dict]))
            .map_err(|e| Error::inference(format!("module forward failed: {}", e)))?;

        Outputs::from_ivalue(output)
    }
}

/// Named outputs returned by a module's forward method
pub struct Outputs(Vec<(String, IValue)>);

impl Outputs {
    pub(crate) fn from_ivalue(value: IValue) -> Result<Self> {
        let IValue::GenericDict(entries) = value else {
            return Err(Error::inference(
                "module did not return a dict of named outputs",
            ));
        };

        let mut outputs = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let IValue::String(name) = key else {
                return Err(Error::inference("module output keys must be strings"));
            };
            outputs.push((name, value));
        }
        Ok(Self(outputs))
    }

    fn get(&self, name: &str) -> Result<&IValue> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::inference(format!("module output has no `{}` entry", name)))
    }

    /// A tensor-valued output
    pub fn tensor(&self, name: &str) -> Result<&Tensor> {
        match self.get(name)? {
            IValue::Tensor(tensor) => Ok(tensor),
            other => Err(mistyped(name, "tensor", other)),
        }
    }

    /// A string-valued output
    pub fn string(&self, name: &str) -> Result<&str> {
        match self.get(name)? {
            IValue::String(s) => Ok(s),
            other => Err(mistyped(name, "string", other)),
        }
    }

    /// A list-of-strings output
    pub fn strings(&self, name: &str) -> Result<Vec<String>> {
        match self.get(name)? {
            IValue::StringList(items) => Ok(items.clone()),
            IValue::GenericList(items) => items
                .iter()
                .map(|item| match item {
                    IValue::String(s) => Ok(s.clone()),
                    other => Err(mistyped(name, "string list", other)),
                })
                .collect(),
            other => Err(mistyped(name, "string list", other)),
        }
    }

    /// A string-valued output that the module may omit
    pub fn optional_string(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n == name).and_then(|(_, v)| match v {
            IValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// A list-of-floats output, accepted as a double list or a float tensor
    pub fn floats(&self, name: &str) -> Result<Vec<f64>> {
        match self.get(name)? {
            IValue::DoubleList(items) => Ok(items.clone()),
            IValue::Tensor(tensor) => {
                let flat = tensor.view(-1).to_kind(tch::Kind::Double);
                Vec::<f64>::try_from(&flat).map_err(|e| {
                    Error::inference(format!("output `{}` is not float: {}", name, e))
                })
            }
            other => Err(mistyped(name, "float list", other)),
        }
    }

    /// A list-of-ints output, accepted as an int list or an integer tensor
    pub fn ints(&self, name: &str) -> Result<Vec<i64>> {
        match self.get(name)? {
            IValue::IntList(items) => Ok(items.clone()),
            IValue::Tensor(tensor) => {
                let flat = tensor.view(-1);
                Vec::<i64>::try_from(&flat).map_err(|e| {
                    Error::inference(format!("output `{}` is not integral: {}", name, e))
                })
            }
            other => Err(mistyped(name, "int list", other)),
        }
    }

    /// A nested integer structure (lists of lists, arbitrarily deep)
    pub fn int_tree(&self, name: &str) -> Result<serde_json::Value> {
        fn convert(name: &str, value: &IValue) -> Result<serde_json::Value> {
            match value {
                IValue::Int(i) => Ok(serde_json::Value::from(*i)),
                IValue::IntList(items) => Ok(serde_json::Value::from(items.clone())),
                IValue::GenericList(items) => items
                    .iter()
                    .map(|item| convert(name, item))
                    .collect::<Result<Vec<_>>>()
                    .map(serde_json::Value::from),
                other => Err(mistyped(name, "nested int list", other)),
            }
        }
        convert(name, self.get(name)?)
    }
}

fn mistyped(name: &str, expected: &str, actual: &IValue) -> Error {
    Error::inference(format!(
        "module output `{}` is not a {} (got {:?})",
        name, expected, actual
    ))
}
