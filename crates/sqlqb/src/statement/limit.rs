use super::Statement;
use crate::ident::is_numeric;
use crate::params::ParamList;

/// Something that can be read as a LIMIT count or offset.
///
/// Integers are taken as-is when non-negative; strings must look numeric
/// (`"10"`, `" 2.5 "`) and are truncated toward zero. Anything else is
/// rejected and leaves the limit unchanged.
pub trait LimitArg {
    fn to_limit(&self) -> Option<u64>;
}

macro_rules! limit_arg_int {
    ($($t:ty),*) => {
        $(
            impl LimitArg for $t {
                fn to_limit(&self) -> Option<u64> {
                    u64::try_from(*self).ok()
                }
            }
        )*
    };
}

limit_arg_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl LimitArg for &str {
    fn to_limit(&self) -> Option<u64> {
        if !is_numeric(self) {
            return None;
        }
        let n: f64 = self.trim().parse().ok()?;
        if n.is_finite() && n >= 0.0 {
            Some(n.trunc() as u64)
        } else {
            None
        }
    }
}

impl LimitArg for String {
    fn to_limit(&self) -> Option<u64> {
        self.as_str().to_limit()
    }
}

impl LimitArg for &String {
    fn to_limit(&self) -> Option<u64> {
        self.as_str().to_limit()
    }
}

/// `LIMIT count` or `LIMIT offset,count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitStatement {
    count: Option<u64>,
    offset: u64,
}

impl LimitStatement {
    /// No limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set count and offset together. Nothing changes unless both are valid.
    pub fn set_limit(&mut self, count: impl LimitArg, offset: impl LimitArg) -> &mut Self {
        if let (Some(count), Some(offset)) = (count.to_limit(), offset.to_limit()) {
            self.count = Some(count);
            self.offset = offset;
        }
        self
    }

    /// Row count, if one has been set.
    pub fn limit(&self) -> Option<u64> {
        self.count
    }

    /// Offset; `0` unless set.
    pub fn start(&self) -> u64 {
        self.offset
    }
}

impl Statement for LimitStatement {
    fn render(&self, _params: &mut ParamList) -> String {
        match self.count {
            None => String::new(),
            Some(count) if self.offset > 0 => format!("LIMIT {},{}", self.offset, count),
            Some(count) => format!("LIMIT {count}"),
        }
    }
}
