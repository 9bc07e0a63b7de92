//! Validator chains: the control-flow primitive of the engine
//!
//! A [`Validator`] is a tagged function object built by a constructor that
//! captures its configuration (maximum length, allowed set, shared chain)
//! at chain-construction time. [`run`] executes an ordered chain against one
//! field, stopping at the first validator that returns `false`. Composition
//! happens only by building longer or differently-ordered chains ahead of
//! time; no validator may re-enter or restart a chain.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use crate::path::Path;
use crate::value::FieldValue;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

mod checks;
mod transforms;

pub use checks::{
    check_list_size, is_bool, is_dictionary, is_header_string, is_int, is_list, is_number,
    is_string, is_string_line, is_url, is_valid_license, list_has_unique_strings, required,
};
pub use transforms::{
    delete_field, is_localized_string, string_to_list, unique_sort_str_list, use_default,
    validate_data_type, DefaultValue,
};

/// Stable message keys for every error the validator library can emit.
pub mod keys {
    pub const ERR_BOOL: &str = "datadoc-err-bool";
    pub const ERR_STRING: &str = "datadoc-err-string";
    pub const ERR_STRINGLINE: &str = "datadoc-err-stringline";
    pub const ERR_INTEGER: &str = "datadoc-err-integer";
    pub const ERR_NUMBER: &str = "datadoc-err-number";
    pub const ERR_ARRAY: &str = "datadoc-err-array";
    pub const ERR_ASSOC_ARRAY: &str = "datadoc-err-assoc-array";
    pub const ERR_URL: &str = "datadoc-err-url";
    pub const ERR_BAD_HEADER_STRING: &str = "datadoc-err-bad-header-string";
    pub const ERR_UNIQUE_STRINGS: &str = "datadoc-err-unique-strings";
    pub const ERR_ARRAY_COUNT: &str = "datadoc-err-array-count";
    pub const ERR_LOCALIZED: &str = "datadoc-err-localized";
    pub const ERR_BAD_TYPE: &str = "datadoc-err-bad-type";
    pub const ERR_LICENSE: &str = "datadoc-err-license";
    pub const ERR_REQUIRED: &str = "datadoc-err-required";
    pub const ERR_ROOT: &str = "datadoc-err-root";
    pub const ERR_UNEXPECTED_KEY: &str = "datadoc-err-unexpected-key";
}

/// Signature shared by every validator in a chain.
///
/// The validator may mutate the field's content, status, or error list.
/// Returning `false` aborts the remaining validators in this chain; it does
/// not affect sibling fields. The full document is passed read-only for
/// custom cross-field rules.
pub type ValidatorFn = dyn Fn(&mut FieldValue, &Path, &Value) -> bool;

/// A named, boxed validator function. Built by the constructor functions in
/// this module; configuration is bound when the constructor runs.
pub struct Validator {
    name: &'static str,
    run: Box<ValidatorFn>,
}

impl Validator {
    pub fn new<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&mut FieldValue, &Path, &Value) -> bool + 'static,
    {
        Self {
            name,
            run: Box::new(f),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this validator to one field. `true` means continue the chain.
    pub fn check(&self, value: &mut FieldValue, path: &Path, document: &Value) -> bool {
        (self.run)(value, path, document)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

/// An ordered validator chain for one field.
pub type Chain = Vec<Validator>;

/// Execute `chain` against `value` strictly in order, stopping at the first
/// validator that returns `false`. An empty chain accepts the field as-is.
pub fn run(chain: &[Validator], value: &mut FieldValue, path: &Path, document: &Value) {
    for validator in chain {
        if !validator.check(value, path, document) {
            break;
        }
    }
}

/// A shared, append-only chain under construction.
///
/// This is the explicit handle for the one controlled cross-field effect in
/// the library: [`validate_data_type`] appends a concrete validator for a
/// *later* field to a builder owned by the document schema. `Rc`-based and
/// deliberately not `Send`; chain construction and execution are
/// single-threaded and strictly sequential within one validation pass.
///
/// A validator executed from this builder must not append to the same
/// builder.
#[derive(Clone, Default)]
pub struct ChainBuilder {
    inner: Rc<RefCell<Chain>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator to the chain under construction.
    pub fn push(&self, validator: Validator) {
        self.inner.borrow_mut().push(validator);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Execute the chain in its current state via [`run`].
    pub fn run(&self, value: &mut FieldValue, path: &Path, document: &Value) {
        let chain = self.inner.borrow();
        run(&chain, value, path, document);
    }
}

impl fmt::Debug for ChainBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.inner.borrow().iter().map(|v| v.name()).collect();
        f.debug_tuple("ChainBuilder").field(&names).finish()
    }
}
