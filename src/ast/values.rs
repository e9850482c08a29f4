use super::ast::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::{CollectIn, Vec};
use tracing::debug;

/// Trait for coercing native Rust values into AST [Value] nodes.
///
/// This is what the builder functions, e.g. [`prop`](super::prop) and [`arg`](super::arg), accept
/// as a value. Strings, numbers and byte slices are copied onto the arena of the given
/// [`ASTContext`], while input objects are taken by reference.
///
/// Coercion fails with [`ErrorType::UnsupportedValueKind`] when a value has no GraphQL literal,
/// which is the case for non-finite floats.
pub trait IntoValue<'a> {
    /// Convert this value into an AST Value allocated on the given context.
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>>;
}

impl<'a> Value<'a> {
    /// Creates a byte sequence value, copying `bytes` onto the arena.
    #[inline]
    pub fn bytes(ctx: &'a ASTContext, bytes: &[u8]) -> Value<'a> {
        Value::Bytes(BytesValue {
            bytes: ctx.arena.alloc_slice_copy(bytes),
        })
    }

    /// Creates a list of input objects, keeping references to the given objects.
    pub fn objects<I>(ctx: &'a ASTContext, objects: I) -> Value<'a>
    where
        I: IntoIterator<Item = &'a InputObject<'a>>,
    {
        Value::Objects(ObjectListValue {
            children: objects.into_iter().collect_in(&ctx.arena),
        })
    }

    /// Creates a list value by coercing each item.
    pub fn list<I, V>(ctx: &'a ASTContext, items: I) -> Result<Value<'a>>
    where
        I: IntoIterator<Item = V>,
        V: IntoValue<'a>,
    {
        let mut children = Vec::new_in(&ctx.arena);
        for item in items {
            children.push(item.into_value(ctx)?);
        }
        Ok(Value::List(ListValue { children }))
    }

    /// Creates an unquoted enum value, e.g. `MOBILE_WEB`.
    #[inline]
    pub fn enum_value(value: &'a str) -> Value<'a> {
        Value::Enum(EnumValue { value })
    }

    /// Creates a reference to the operation variable `$name`.
    #[inline]
    pub fn variable(name: &'a str) -> Value<'a> {
        Value::Variable(Variable { name })
    }

    /// Checks whether this value is `null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Writes a number in its canonical decimal form onto the arena.
fn format_number<N: lexical_core::ToLexical>(ctx: &ASTContext, number: N) -> Result<&str> {
    let mut buf = [b'0'; lexical_core::BUFFER_SIZE];
    let digits = lexical_core::write(number, &mut buf);
    std::str::from_utf8(digits)
        .map(|digits| ctx.alloc_str(digits))
        .map_err(|_| Error::new("Number was formatted to invalid text", ErrorType::Format))
}

macro_rules! int_into_value {
    ($($int:ty),+) => {
        $(
            impl<'a> IntoValue<'a> for $int {
                #[inline]
                fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
                    Ok(Value::Int(IntValue {
                        value: format_number(ctx, self)?,
                    }))
                }
            }
        )+
    };
}

int_into_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_into_value {
    ($($float:ty),+) => {
        $(
            impl<'a> IntoValue<'a> for $float {
                fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
                    if !self.is_finite() {
                        debug!(value = %self, "rejected non-finite float");
                        return Err(Error::new(
                            format!("Float `{}` has no GraphQL literal", self),
                            ErrorType::UnsupportedValueKind,
                        ));
                    }
                    Ok(Value::Float(FloatValue {
                        value: format_number(ctx, self)?,
                    }))
                }
            }
        )+
    };
}

float_into_value!(f32, f64);

macro_rules! node_into_value {
    ($($node:ty),+) => {
        $(
            impl<'a> IntoValue<'a> for $node {
                #[inline]
                fn into_value(self, _ctx: &'a ASTContext) -> Result<Value<'a>> {
                    Ok(self.into())
                }
            }
        )+
    };
}

node_into_value!(
    Variable<'a>,
    StringValue<'a>,
    IntValue<'a>,
    FloatValue<'a>,
    BooleanValue,
    EnumValue<'a>,
    BytesValue<'a>,
    ListValue<'a>,
    ObjectListValue<'a>,
    &'a InputObject<'a>
);

impl<'a> IntoValue<'a> for Value<'a> {
    #[inline]
    fn into_value(self, _ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(self)
    }
}

impl<'a> IntoValue<'a> for bool {
    #[inline]
    fn into_value(self, _ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::Boolean(self.into()))
    }
}

impl<'a, 'b> IntoValue<'a> for &'b str {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::String(StringValue::new(ctx, self)))
    }
}

impl<'a, 'b> IntoValue<'a> for &'b String {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::String(StringValue::new(ctx, self)))
    }
}

impl<'a> IntoValue<'a> for String {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::String(StringValue {
            value: ctx.alloc_string(self),
        }))
    }
}

impl<'a> IntoValue<'a> for char {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        let mut buf = [0; 4];
        Ok(Value::String(StringValue::new(ctx, self.encode_utf8(&mut buf))))
    }
}

impl<'a, T> IntoValue<'a> for Option<T>
where
    T: IntoValue<'a>,
{
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        match self {
            Some(value) => value.into_value(ctx),
            None => Ok(Value::Null),
        }
    }
}

impl<'a, 'b> IntoValue<'a> for &'b [u8] {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::bytes(ctx, self))
    }
}

impl<'a, 'b, const N: usize> IntoValue<'a> for &'b [u8; N] {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::bytes(ctx, self))
    }
}

impl<'a> IntoValue<'a> for std::vec::Vec<u8> {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::bytes(ctx, &self))
    }
}

impl<'a, 'b> IntoValue<'a> for &'b [&'a InputObject<'a>] {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::objects(ctx, self.iter().copied()))
    }
}

impl<'a, const N: usize> IntoValue<'a> for [&'a InputObject<'a>; N] {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::objects(ctx, self))
    }
}

impl<'a> IntoValue<'a> for std::vec::Vec<&'a InputObject<'a>> {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        Ok(Value::objects(ctx, self))
    }
}
