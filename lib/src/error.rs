use std::{fmt, io};
use std::panic::Location;
use std::string::FromUtf8Error;
use std::error::Error as StdError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A chain of error details. The outermost detail describes what the caller
/// was doing; `prev` holds whatever went wrong underneath it.
#[derive(Debug)]
pub struct Error {
    detail: Vec<Box<dyn ErrorDetail>>,
    prev: Option<Box<Error>>,
    _location: &'static Location<'static>,
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    /// Places `self` underneath `other`, returning `other`.
    pub fn chain(self, mut other: Error) -> Self {
        fn _chain(error: Error, behind: &mut Error) {
            match behind.prev.as_mut() {
                Some(prev) => _chain(error, prev),
                None => behind.prev = Some(Box::new(error)),
            }
        }

        _chain(self, &mut other);
        other
    }

    /// The outermost message of the chain.
    pub fn message(&self) -> String {
        self.detail.first().map(|d| d.to_string()).unwrap_or_default()
    }

    /// Iterates over this error and every error it was chained on top of.
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |e| e.prev.as_deref())
    }
}

impl ErrorDetail for &(dyn StdError + Send + Sync) {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let mut ctxt = vec![];
        let mut error = self.source();
        while let Some(e) = error {
            ctxt.push((None, e.to_string()));
            error = e.source();
        }

        ctxt
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($($T:ty),* $(,)?) => {
        $(
            impl $crate::error::ErrorDetail for $T {
                fn context(&self) -> Vec<(Option<String>, String)> {
                    let error: &(dyn std::error::Error + Send + Sync) = self;
                    error.context()
                }
            }
        )*
    }
}

impl_error_detail_with_std_error! {
    io::Error,
    FromUtf8Error,
    jwalk::Error,
    serde_yaml::Error,
    serde_json::Error,
    toml::de::Error,
}

impl ErrorDetail for Box<dyn StdError + Send + Sync> {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let error: &(dyn StdError + Send + Sync) = &**self;
        error.context()
    }
}

impl ErrorDetail for String { }
impl ErrorDetail for &str { }

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            prev: None,
            detail: vec![Box::new(detail)],
            _location: Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, error) in self.iter().enumerate() {
            let indent = " ".repeat(depth * 4);
            let newline = format!("\n{indent}");
            for detail in &error.detail {
                writeln!(f, "{indent}{}", format!("{detail:#}").replace('\n', &newline))?;
                for (key, value) in detail.context() {
                    let value = value.replace('\n', &newline);
                    match key {
                        Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                        None => writeln!(f, "{indent}{value}")?,
                    }
                }
            }

            if std::env::var_os("RUST_BACKTRACE").is_some() {
                writeln!(f, "{indent}[{}]", error._location)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct MakeshiftError {
    pub message: String,
    pub parameters: Vec<(Option<String>, String)>,
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr, $($rest:tt)*) => (
        $crate::error::Error::from($crate::error::MakeshiftError {
            message: $msg.to_string(),
            parameters: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $crate::error!(@param v $($rest)*);
                v
            },
        })
    );

    ($msg:expr) => ( $crate::error!($msg,) );

    (@param $v:ident $key:expr => $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $key => $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $key:expr => $value:expr) => {
        $v.push((Some($key.to_string()), $value.to_string()));
    };

    (@param $v:ident $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $value:expr) => {
        $v.push((None, $value.to_string()));
    };

    (@param $v:ident $(,)?) => { };
}

impl fmt::Display for MakeshiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl ErrorDetail for MakeshiftError {
    fn context(&self) -> Vec<(Option<String>, String)> {
        self.parameters.clone()
    }
}

pub trait Chainable<T> {
    fn chain(self, other: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, other: impl Into<Error>) -> Result<T> {
        self.map_err(|e| e.into().chain(other.into()))
    }

    #[track_caller]
    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>,
    {
        self.map_err(|e| e.into().chain(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_errors_render_outermost_first() {
        let inner: Result<()> = err!("no such file", "path" => "samples/a.cs");
        let error = inner.chain(error!("failed to read sample")).unwrap_err();

        assert_eq!(error.message(), "failed to read sample");
        assert_eq!(error.iter().count(), 2);

        let rendered = error.to_string();
        let outer = rendered.find("failed to read sample").unwrap();
        let inner = rendered.find("no such file").unwrap();
        assert!(outer < inner);
        assert!(rendered.contains("    path: samples/a.cs"));
    }

    #[test]
    fn std_errors_convert() {
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        let error = Error::from(io);
        assert_eq!(error.message(), "gone");
    }
}
