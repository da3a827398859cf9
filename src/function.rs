//! SQL function table for host query engines
//!
//! A host adapter (for example, a SQLite loadable extension) walks [`FUNCTIONS`] or calls
//! [`register_all`] once per connection, then forwards each invocation to [`Function::call`] with
//! the arguments converted into [`Value`]s. Every failure comes back as a [`FunctionError`] for
//! the host to report as a failed call; no handler panics on malformed input.
//!
//! | Name           | Arguments            | Result | Deterministic |
//! | -------------- | -------------------- | ------ | ------------- |
//! | `uuid1`        |                      | text   | no            |
//! | `uuid3`        | namespace text, name | text   | yes           |
//! | `uuid4`        |                      | text   | no            |
//! | `uuid5`        | namespace text, name | text   | yes           |
//! | `uuid_nil`     |                      | text   | yes           |
//! | `uuid_ns_dns`  |                      | text   | yes           |
//! | `uuid_ns_oid`  |                      | text   | yes           |
//! | `uuid_ns_url`  |                      | text   | yes           |
//! | `uuid_ns_x500` |                      | text   | yes           |
//! | `uuid_to_text` | 16-byte blob         | text   | yes           |
//! | `uuid_to_blob` | text                 | blob   | yes           |
//!
//! A NULL argument to any function that takes arguments yields NULL.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::{fmt, str};

use crate::{codec, namespace, uuid1, uuid3, uuid4, uuid5, Uuid};

/// A value crossing the boundary between the host engine and this library.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// A UTF-8 text value.
    Text(String),
    /// A binary value.
    Blob(Vec<u8>),
}

impl From<Uuid> for Value {
    /// Converts into the canonical text form.
    fn from(src: Uuid) -> Self {
        Self::Text(src.into())
    }
}

/// Error reported back to the host as a failed call.
///
/// Argument positions are one-based, as they appear in a query.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum FunctionError {
    /// The namespace argument of `uuid3` or `uuid5` is not a canonical UUID string.
    #[error("{function}(): argument {arg} is not a valid namespace UUID")]
    InvalidNamespace { function: &'static str, arg: usize },

    /// The binary argument is not exactly 16 bytes long.
    #[error("{function}(): argument {arg} must be 16 bytes long, found {len}")]
    InvalidLength {
        function: &'static str,
        arg: usize,
        len: usize,
    },

    /// The text argument is not a canonical UUID string.
    #[error("{function}(): argument {arg} is not a UUID string in 8-4-4-4-12 form")]
    ParseError { function: &'static str, arg: usize },

    /// The function was called with the wrong number of arguments.
    #[error("{function}(): expected {expected} argument(s), found {found}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    /// No function is registered under the name.
    #[error("no such function: {0}")]
    UnknownFunction(String),
}

/// The arguments of a single call, already checked for arity.
#[derive(Clone, Copy, Debug)]
struct Args<'a> {
    function: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn is_null(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Value::Null))
    }

    /// Returns the argument at zero-based `index` as text. Blobs holding valid UTF-8 are read as
    /// text, the way SQL engines coerce them.
    fn text(&self, index: usize) -> Option<&'a str> {
        match self.values.get(index)? {
            Value::Text(s) => Some(s.as_str()),
            Value::Blob(b) => str::from_utf8(b).ok(),
            Value::Null => None,
        }
    }

    /// Returns the argument at zero-based `index` as raw bytes.
    fn bytes(&self, index: usize) -> Option<&'a [u8]> {
        match self.values.get(index)? {
            Value::Text(s) => Some(s.as_bytes()),
            Value::Blob(b) => Some(b.as_slice()),
            Value::Null => None,
        }
    }
}

type Handler = fn(Args<'_>) -> Result<Value, FunctionError>;

/// A function descriptor: what the host needs to register one SQL function.
#[derive(Clone, Copy)]
pub struct Function {
    name: &'static str,
    n_args: usize,
    deterministic: bool,
    handler: Handler,
}

impl Function {
    /// Returns the SQL name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the exact number of arguments the function takes.
    pub const fn n_args(&self) -> usize {
        self.n_args
    }

    /// Returns true if equal arguments always produce equal results, so the host may cache or
    /// constant-fold calls.
    pub const fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::ArgumentCount`] on arity mismatch, or the error kind the function
    /// reports for malformed input.
    #[tracing::instrument(level = "trace", skip_all, fields(function = self.name))]
    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        if args.len() != self.n_args {
            return Err(FunctionError::ArgumentCount {
                function: self.name,
                expected: self.n_args,
                found: args.len(),
            });
        }

        let result = (self.handler)(Args {
            function: self.name,
            values: args,
        });
        if let Err(err) = &result {
            tracing::debug!(%err, "rejected call");
        }
        result
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("n_args", &self.n_args)
            .field("deterministic", &self.deterministic)
            .finish_non_exhaustive()
    }
}

/// Every function this library exposes.
pub static FUNCTIONS: [Function; 11] = [
    Function {
        name: "uuid1",
        n_args: 0,
        deterministic: false,
        handler: |_| Ok(uuid1().into()),
    },
    Function {
        name: "uuid3",
        n_args: 2,
        deterministic: true,
        handler: |args| name_based(args, |ns, name| uuid3(ns, name)),
    },
    Function {
        name: "uuid4",
        n_args: 0,
        deterministic: false,
        handler: |_| Ok(uuid4().into()),
    },
    Function {
        name: "uuid5",
        n_args: 2,
        deterministic: true,
        handler: |args| name_based(args, |ns, name| uuid5(ns, name)),
    },
    Function {
        name: "uuid_nil",
        n_args: 0,
        deterministic: true,
        handler: |_| Ok(Uuid::NIL.into()),
    },
    Function {
        name: "uuid_ns_dns",
        n_args: 0,
        deterministic: true,
        handler: |_| Ok(namespace::DNS.into()),
    },
    Function {
        name: "uuid_ns_oid",
        n_args: 0,
        deterministic: true,
        handler: |_| Ok(namespace::OID.into()),
    },
    Function {
        name: "uuid_ns_url",
        n_args: 0,
        deterministic: true,
        handler: |_| Ok(namespace::URL.into()),
    },
    Function {
        name: "uuid_ns_x500",
        n_args: 0,
        deterministic: true,
        handler: |_| Ok(namespace::X500.into()),
    },
    Function {
        name: "uuid_to_text",
        n_args: 1,
        deterministic: true,
        handler: to_text,
    },
    Function {
        name: "uuid_to_blob",
        n_args: 1,
        deterministic: true,
        handler: to_blob,
    },
];

fn name_based(args: Args<'_>, generate: fn(&Uuid, &[u8]) -> Uuid) -> Result<Value, FunctionError> {
    if args.is_null(0) {
        return Ok(Value::Null);
    }
    let Some(name) = args.bytes(1) else {
        return Ok(Value::Null);
    };

    let namespace = args
        .text(0)
        .and_then(|s| s.parse::<Uuid>().ok())
        .ok_or(FunctionError::InvalidNamespace {
            function: args.function,
            arg: 1,
        })?;
    Ok(generate(&namespace, name).into())
}

fn to_text(args: Args<'_>) -> Result<Value, FunctionError> {
    let Some(bytes) = args.bytes(0) else {
        return Ok(Value::Null);
    };

    codec::to_text(bytes)
        .map(Value::Text)
        .map_err(|err| FunctionError::InvalidLength {
            function: args.function,
            arg: 1,
            len: err.found(),
        })
}

fn to_blob(args: Args<'_>) -> Result<Value, FunctionError> {
    if args.is_null(0) {
        return Ok(Value::Null);
    }

    args.text(0)
        .and_then(|s| codec::to_blob(s).ok())
        .map(|bytes| Value::Blob(bytes.to_vec()))
        .ok_or(FunctionError::ParseError {
            function: args.function,
            arg: 1,
        })
}

/// Looks up a function by its SQL name, ignoring ASCII case as SQL does.
pub fn lookup(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Looks up a function by name and invokes it.
///
/// # Errors
///
/// Returns [`FunctionError::UnknownFunction`] if no function has the name, or whatever
/// [`Function::call`] returns.
///
/// # Examples
///
/// ```rust
/// use uuidfunc::function::{call, Value};
///
/// let dns = call("uuid_ns_dns", &[])?;
/// let uuid = call("uuid5", &[dns, Value::Text("example.org".into())])?;
/// assert_eq!(uuid, Value::Text("aad03681-8b63-5304-89e0-8ca8f49461b5".into()));
/// # Ok::<(), uuidfunc::function::FunctionError>(())
/// ```
pub fn call(name: &str, args: &[Value]) -> Result<Value, FunctionError> {
    lookup(name)
        .ok_or_else(|| FunctionError::UnknownFunction(name.to_owned()))?
        .call(args)
}

/// The seam a host adapter implements to make the functions callable from its query language.
pub trait Registrar {
    /// The error the host reports when a registration fails.
    type Error;

    /// Registers a single function.
    fn register(&mut self, function: &'static Function) -> Result<(), Self::Error>;
}

/// Registers every function in [`FUNCTIONS`], stopping at the first failure.
///
/// # Errors
///
/// Returns the first error reported by `registrar`.
pub fn register_all<R: Registrar + ?Sized>(registrar: &mut R) -> Result<(), R::Error> {
    FUNCTIONS.iter().try_for_each(|f| {
        tracing::trace!(function = f.name, n_args = f.n_args, "registering");
        registrar.register(f)
    })
}
