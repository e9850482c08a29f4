pub use super::ast_conversion::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::{CollectIn, Vec};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};
use std::{
    cell::{Ref, RefCell},
    fmt, ptr,
};

/// A context for a GraphQL request document which holds an arena allocator.
///
/// For the duration of building and printing a request it's performant and convenient to
/// allocate memory in one chunk for all of its nodes. This context represents the lifetime of a
/// request's AST and its derivatives.
///
/// Input objects that are shared between several parents are stored once in this arena and
/// referenced from every place they're used. Once the request has been printed the entire
/// allocated memory can be dropped at once. Hence however, it's inadvisable to reuse the AST
/// Context across multiple outgoing GraphQL requests.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with a preallocated arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        ASTContext { arena }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime.
    /// This is typically unnecessary for static slices (`&'static str`) whose lifetimes are as
    /// long as the running program and don't need to be allocated dynamically.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s lifetime
    /// to this AST context without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// AST Node of a boolean value
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Boolean-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BooleanValue {
    pub value: bool,
}

/// AST Node of a variable identifier value.
///
/// These are identifiers prefixed with a `$` sign and must be declared in the operation's
/// [`VariableDefinitions`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Variables)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Variable<'a> {
    pub name: &'a str,
}

/// AST Node of an enum value.
///
/// These are typically written in all caps and snake case, e.g. "`MOBILE_WEB`".
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enum-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EnumValue<'a> {
    pub value: &'a str,
}

/// AST Node of an integer value.
///
/// The integer is kept in its canonical decimal form, without a fractional part, so that
/// printing it is a plain copy.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Int)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct IntValue<'a> {
    pub value: &'a str,
}

/// AST Node of a floating point value.
///
/// Floats are kept in their canonical textual form, which always carries a fractional part or
/// an exponent. Only finite values can be represented.
/// [Reference](https://spec.graphql.org/October2021/#sec-Float)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct FloatValue<'a> {
    pub value: &'a str,
}

/// AST Node of a string value.
///
/// The `value` is the raw, unescaped string. Escaping happens when it's printed.
/// [Reference](https://spec.graphql.org/October2021/#sec-String)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct StringValue<'a> {
    pub value: &'a str,
}

impl<'a> StringValue<'a> {
    pub fn new<S: AsRef<str>>(ctx: &'a ASTContext, str: S) -> Self {
        StringValue {
            value: ctx.alloc_str(str.as_ref()),
        }
    }
}

/// AST Node of a raw byte sequence.
///
/// Each byte is printed as an integer literal inside a GraphQL list, e.g. `[0, 1, 2]`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BytesValue<'a> {
    pub bytes: &'a [u8],
}

impl<'a> BytesValue<'a> {
    /// Checks whether this sequence contains any bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// AST Node of possible input values in a GraphQL request.
///
/// Fields accept input values as arguments and input objects hold them as their fields' values.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    Variable(Variable<'a>),
    String(StringValue<'a>),
    Float(FloatValue<'a>),
    Int(IntValue<'a>),
    Boolean(BooleanValue),
    Enum(EnumValue<'a>),
    Bytes(BytesValue<'a>),
    List(ListValue<'a>),
    Objects(ObjectListValue<'a>),
    /// A reference to an input object, which may be shared with other values.
    Object(&'a InputObject<'a>),
    /// Representing JSON-like `null` values or the absence of a value
    Null,
}

/// AST Node for a List of values.
///
/// Lists in GraphQL are ordered sequences and serialize to JSON arrays.
/// [Reference](https://spec.graphql.org/October2021/#sec-List-Value)
#[derive(Debug, PartialEq, Clone)]
pub struct ListValue<'a> {
    pub children: Vec<'a, Value<'a>>,
}

impl<'a> ListValue<'a> {
    /// Checks whether this List contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a List of input objects.
///
/// The input objects are held by reference, so a single object may appear in several lists.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectListValue<'a> {
    pub children: Vec<'a, &'a InputObject<'a>>,
}

impl<'a> ObjectListValue<'a> {
    /// Checks whether this List contains any input objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a field of an input object.
///
/// [Reference](https://spec.graphql.org/October2021/#ObjectField)
#[derive(Debug, PartialEq, Clone)]
pub struct InputObjectField<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for an input object, which is an ordered list of input object fields.
///
/// The order in which fields are added is the order in which they're printed.
///
/// Input objects live on the arena and are referenced by [`Value::Object`] and
/// [`ObjectListValue`], so the same object can be reused as a value in several places and is
/// printed in full in each of them. Fields may still be appended after an object has been
/// shared using [`InputObject::append`]. It's up to the caller not to make an object reachable
/// from itself; printing such a cycle fails with [`ErrorType::CyclicReference`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Object-Values)
pub struct InputObject<'a> {
    pub(crate) fields: RefCell<Vec<'a, InputObjectField<'a>>>,
}

impl<'a> InputObject<'a> {
    /// Creates an input object from the given fields and puts it onto the arena.
    pub fn new_in<I>(ctx: &'a ASTContext, fields: I) -> &'a InputObject<'a>
    where
        I: IntoIterator<Item = InputObjectField<'a>>,
    {
        let fields: Vec<'a, InputObjectField<'a>> = fields.into_iter().collect_in(&ctx.arena);
        ctx.alloc(InputObject {
            fields: RefCell::new(fields),
        })
    }

    /// Borrows this object's fields in insertion order.
    #[inline]
    pub fn children(&self) -> Ref<'_, [InputObjectField<'a>]> {
        Ref::map(self.fields.borrow(), |fields| fields.as_slice())
    }

    /// Returns the number of fields on this object.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.borrow().len()
    }

    /// Checks whether this object contains any fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.borrow().is_empty()
    }

    /// Returns the value of the first field with the given `name`.
    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.fields
            .borrow()
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.clone())
    }

    /// Appends a field to this object in place.
    ///
    /// Every value that already references this object sees the new field. Use
    /// [`InputObject::with_field`] to derive a new object instead.
    pub fn append(&self, field: InputObjectField<'a>) {
        self.fields.borrow_mut().push(field);
    }

    /// Returns a copy of this object with `field` appended, leaving this object unchanged.
    pub fn with_field(
        &self,
        ctx: &'a ASTContext,
        field: InputObjectField<'a>,
    ) -> &'a InputObject<'a> {
        let copy = self.cloned_in(ctx);
        copy.append(field);
        copy
    }

    /// Creates a shallow copy of this object on the arena.
    ///
    /// The copy's field list is independent of this object's, while nested input objects are
    /// still shared by reference.
    pub fn cloned_in(&self, ctx: &'a ASTContext) -> &'a InputObject<'a> {
        InputObject::new_in(ctx, self.fields.borrow().iter().cloned())
    }

    /// Returns a `Map` keyed by all field names mapped to their values.
    pub fn as_map(
        &self,
        ctx: &'a ASTContext,
    ) -> HashMap<&'a str, Value<'a>, DefaultHashBuilder, &'a bumpalo::Bump> {
        let mut map = HashMap::new_in(&ctx.arena);
        for field in self.fields.borrow().iter() {
            map.insert(field.name, field.value.clone());
        }
        map
    }
}

// Nested objects are compared by identity, since they may form a cycle.
impl<'a> PartialEq for InputObject<'a> {
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let (left, right) = (self.fields.borrow(), other.fields.borrow());
        left.len() == right.len()
            && left.iter().zip(right.iter()).all(|(left, right)| {
                left.name == right.name && shallow_eq(&left.value, &right.value)
            })
    }
}

fn shallow_eq<'a>(left: &Value<'a>, right: &Value<'a>) -> bool {
    match (left, right) {
        (Value::Object(left), Value::Object(right)) => ptr::eq(*left, *right),
        (Value::Objects(left), Value::Objects(right)) => {
            left.children.len() == right.children.len()
                && left
                    .children
                    .iter()
                    .zip(right.children.iter())
                    .all(|(left, right)| ptr::eq(*left, *right))
        }
        (Value::List(left), Value::List(right)) => {
            left.children.len() == right.children.len()
                && left
                    .children
                    .iter()
                    .zip(right.children.iter())
                    .all(|(left, right)| shallow_eq(left, right))
        }
        _ => left == right,
    }
}

// Nested objects aren't followed, since they may form a cycle.
impl<'a> fmt::Debug for InputObject<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.borrow();
        f.debug_struct("InputObject")
            .field(
                "fields",
                &fields.iter().map(|field| field.name).collect::<std::vec::Vec<_>>(),
            )
            .finish()
    }
}

/// AST Node for an Argument, which carries a name and a value.
///
/// [Reference](https://spec.graphql.org/October2021/#Argument)
#[derive(Debug, PartialEq, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for a list of Arguments, which are similar to parameterized inputs to a function.
///
/// Arguments are printed in the order they were added.
/// [Reference](https://spec.graphql.org/October2021/#Arguments)
#[derive(Debug, PartialEq, Clone)]
pub struct Arguments<'a> {
    pub children: Vec<'a, Argument<'a>>,
}

impl<'a> Arguments<'a> {
    /// Checks whether this list of Arguments contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Converts `Arguments` into an input object on the arena.
    #[inline]
    pub fn as_input_object(&self, ctx: &'a ASTContext) -> &'a InputObject<'a> {
        InputObject::new_in(
            ctx,
            self.children.iter().map(|arg| InputObjectField {
                name: arg.name,
                value: arg.value.clone(),
            }),
        )
    }

    /// Returns a `Map` keyed by all arguments' names mapped to their values.
    pub fn as_map<'s>(
        &'s self,
        ctx: &'a ASTContext,
    ) -> HashMap<&'a str, &'s Value<'a>, DefaultHashBuilder, &'a bumpalo::Bump> {
        let mut map = HashMap::new_in(&ctx.arena);
        for argument in self.children.iter() {
            map.insert(argument.name, &argument.value);
        }
        map
    }
}

/// AST Node for Selection Sets, which provide a way to select more information on a given parent.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Selection-Sets)
#[derive(Debug, PartialEq, Clone)]
pub struct SelectionSet<'a> {
    pub selections: Vec<'a, Field<'a>>,
}

impl<'a> SelectionSet<'a> {
    /// Checks whether this Selection Set contains any selections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// AST Node for Fields, which can be likened to functions or properties on a parent object.
///
/// A Field without any selections is a leaf that selects a scalar. Selecting the same field
/// name twice on the same level is allowed and both selections are printed.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fields)
#[derive(Debug, PartialEq, Clone)]
pub struct Field<'a> {
    /// A Field's `alias`, which is used to request information under a different name than the
    /// Field's `name`.
    /// [Reference](https://spec.graphql.org/October2021/#sec-Field-Alias)
    pub alias: Option<&'a str>,
    /// A Field's `name`, which represents a resolver on a GraphQL schema's object type.
    pub name: &'a str,
    /// Arguments that are passed to a Field.
    ///
    /// When no Arguments are passed, this will be an empty
    /// list, as can be checked using `Arguments::is_empty`.
    /// See: [Arguments]
    pub arguments: Arguments<'a>,
    /// A sub-Selection Set that is passed below this field to add selections to this field's
    /// returned GraphQL object type.
    ///
    /// When no selections are present, this will be an empty
    /// list, as can be checked using `SelectionSet::is_empty`.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Field<'a> {
    /// Get the alias of the field, if present, otherwise get the name.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }

    /// Creates a new leaf field with the given `name`.
    ///
    /// Both `arguments` and `selection_set` will be created as empty defaults.
    #[inline]
    pub fn new_leaf(ctx: &'a ASTContext, name: &'a str) -> Self {
        Field {
            alias: None,
            name,
            arguments: Arguments::default_in(&ctx.arena),
            selection_set: SelectionSet::default_in(&ctx.arena),
        }
    }

    /// Returns this field requested under the given `alias`.
    #[inline]
    pub fn with_alias(self, alias: &'a str) -> Self {
        Field {
            alias: Some(alias),
            ..self
        }
    }

    /// Checks whether this field selects a scalar, i.e. has no sub-selections.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.selection_set.is_empty()
    }
}

/// AST Node for a type name.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NamedType<'a> {
    pub name: &'a str,
}

/// AST Node for a type reference.
///
/// [`VariableDefinitions`] must describe their type, including whether they expect
/// lists, non-null values, or a type reference, which is a recursive type definition.
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-References)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Type<'a> {
    /// A reference to a named input type, which is a leaf node of a [Type].
    NamedType(NamedType<'a>),
    /// A list node wrapper for a Type.
    ListType(&'a Type<'a>),
    /// A non-null node wrapper for a Type.
    NonNullType(&'a Type<'a>),
}

impl<'a> Type<'a> {
    /// Creates a reference to the named input type `name`.
    #[inline]
    pub fn named(name: &'a str) -> Type<'a> {
        Type::NamedType(NamedType { name })
    }

    /// Wraps this type in a list, indicating that it expects the current Type to be a list of
    /// itself instead.
    #[inline]
    pub fn into_list(self, ctx: &'a ASTContext) -> Type<'a> {
        Type::ListType(ctx.alloc(self))
    }

    /// A non-null node wrapper for a Type, indicating that `null` may not be passed instead
    /// of the contained type.
    #[inline]
    pub fn into_nonnull(self, ctx: &'a ASTContext) -> Type<'a> {
        Type::NonNullType(ctx.alloc(self))
    }

    /// Unwraps a Type recursively and returns the `NamedType` that is contained within its
    /// wrappers.
    #[inline]
    pub fn of_type(&self) -> &NamedType<'a> {
        match self {
            Type::NamedType(of_type) => of_type,
            Type::ListType(inner) | Type::NonNullType(inner) => inner.of_type(),
        }
    }
}

/// AST Node for a variable definition.
///
/// [Reference](https://spec.graphql.org/October2021/#VariableDefinition)
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinition<'a> {
    /// The variable's name, as in, its identifier, which is prefixed with a `$` sign in the
    /// document.
    pub variable: Variable<'a>,
    /// Annotation of the type of a given variable, which ultimately leads to a type reference of
    /// an input type, as defined on a GraphQL schema.
    pub of_type: Type<'a>,
    /// A value that's used when the variable isn't passed. A `Some(Value::Null)` default is
    /// printed as `= null`.
    pub default_value: Option<Value<'a>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinitions<'a> {
    pub children: Vec<'a, VariableDefinition<'a>>,
}

impl<'a> VariableDefinitions<'a> {
    /// Checks whether the list of Variable Definitions is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a kind of operation, as referred to by an [`Operation`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// The keyword that introduces an operation of this kind.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

/// AST Node for an Operation, which defines the entrypoint for GraphQL's execution.
///
/// Operations are always printed with their keyword, even anonymous queries, which GraphQL would
/// otherwise allow to be shortened to a bare selection set.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Clone)]
pub struct Operation<'a> {
    /// The kind of operation that this definition specifies
    pub operation: OperationKind,
    /// An optional name, as given to the operation.
    ///
    /// A [Document] may contain multiple operations from which a single one is selected during
    /// execution. When a Document contains only a single operation, it doesn't have to have a
    /// name.
    pub name: Option<&'a str>,
    /// A list of variables that the operation defines and accepts during execution.
    pub variable_definitions: VariableDefinitions<'a>,
    /// The top-level fields that are selected on the root type of this kind of operation.
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Operation<'a> {
    /// Returns this operation declaring the given variables.
    #[inline]
    pub fn with_variables(self, variable_definitions: VariableDefinitions<'a>) -> Self {
        Operation {
            variable_definitions,
            ..self
        }
    }
}

/// AST Root Node for a GraphQL request document. This contains zero or more operations.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub struct Document<'a> {
    pub operations: Vec<'a, Operation<'a>>,
}

impl<'a> Document<'a> {
    /// Checks whether this document contains any operations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Finds an operation by name or the single operation contained in the document
    /// when `None` is passed.
    ///
    /// [Reference](https://spec.graphql.org/October2021/#GetOperation())
    pub fn operation(&self, by_name: Option<&str>) -> Result<&Operation<'a>> {
        if let Some(by_name) = by_name {
            self.operations
                .iter()
                .find(|operation| operation.name == Some(by_name))
                .ok_or_else(|| {
                    Error::new(
                        format!("Operation with name {by_name} does not exist"),
                        ErrorType::GraphQL,
                    )
                })
        } else {
            match self.operations.as_slice() {
                [] => Err(Error::new(
                    "Document does not contain any operations",
                    ErrorType::GraphQL,
                )),
                [operation] => Ok(operation),
                _ => Err(Error::new(
                    "Document contains more than one operation, missing operation name",
                    ErrorType::GraphQL,
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    #[test]
    fn operation_no_operations() {
        let ctx = ASTContext::new();
        let ast = document(&ctx, []);
        assert_eq!(
            ast.operation(Some("queryName")).unwrap_err().message,
            "Operation with name queryName does not exist"
        );
        assert_eq!(
            ast.operation(None).unwrap_err().message,
            "Document does not contain any operations"
        );
    }

    #[test]
    fn operation_one_operation() {
        let ctx = ASTContext::new();
        let ast = document(
            &ctx,
            [operation(&ctx, OperationKind::Query, "queryName", [field(&ctx, "hello")])],
        );
        assert_eq!(
            ast.operation(Some("queryName")).unwrap().print().unwrap(),
            "query queryName {\n  hello\n}"
        );
        assert_eq!(
            ast.operation(None).unwrap().print().unwrap(),
            "query queryName {\n  hello\n}"
        );
    }

    #[test]
    fn operation_two_operations_one_anonymous() {
        let ctx = ASTContext::new();
        let ast = document(
            &ctx,
            [
                anonymous_operation(&ctx, OperationKind::Query, [field(&ctx, "hello")]),
                operation(&ctx, OperationKind::Query, "otherName", [field(&ctx, "world")]),
            ],
        );
        assert_eq!(
            ast.operation(Some("queryName")).unwrap_err().message,
            "Operation with name queryName does not exist"
        );
        assert_eq!(
            ast.operation(Some("otherName")).unwrap().print().unwrap(),
            "query otherName {\n  world\n}"
        );
        assert_eq!(
            ast.operation(None).unwrap_err().message,
            "Document contains more than one operation, missing operation name"
        );
    }

    #[test]
    fn append_is_visible_through_shared_references() {
        let ctx = ASTContext::new();
        let shared = input_object(&ctx, [prop(&ctx, "a", 1).unwrap()]);
        let parent = input_object(&ctx, [prop(&ctx, "child", shared).unwrap()]);
        shared.append(prop(&ctx, "b", 2).unwrap());
        assert_eq!(shared.len(), 2);
        match parent.get("child") {
            Some(Value::Object(child)) => assert_eq!(child.len(), 2),
            other => panic!("unexpected value {other:?}"),
        };
    }

    #[test]
    fn with_field_leaves_original_untouched() {
        let ctx = ASTContext::new();
        let base = input_object(&ctx, [prop(&ctx, "level", 0).unwrap()]);
        let derived = base.with_field(&ctx, prop(&ctx, "nestedObject", Value::Null).unwrap());
        assert_eq!(base.len(), 1);
        assert_eq!(derived.len(), 2);
        assert_eq!(derived.get("nestedObject"), Some(Value::Null));
        assert_eq!(base.get("nestedObject"), None);
        assert_eq!(derived.children()[0], base.children()[0]);
    }

    #[test]
    fn cloned_in_shares_nested_objects() {
        let ctx = ASTContext::new();
        let nested = input_object(&ctx, []);
        let base = input_object(&ctx, [prop(&ctx, "nested", nested).unwrap()]);
        let copy = base.cloned_in(&ctx);
        assert!(!std::ptr::eq(base, copy));
        match copy.get("nested") {
            Some(Value::Object(object)) => assert!(std::ptr::eq(object, nested)),
            other => panic!("unexpected value {other:?}"),
        };
    }

    #[test]
    fn equality_of_self_referencing_objects() {
        let ctx = ASTContext::new();
        let a = input_object(&ctx, [prop(&ctx, "level", 0).unwrap()]);
        let b = input_object(&ctx, [prop(&ctx, "level", 0).unwrap()]);
        assert!(*a == *b);

        a.append(prop(&ctx, "self", a).unwrap());
        b.append(prop(&ctx, "self", b).unwrap());
        assert!(*a != *b);
        assert!(*a == *a);
        assert!(*a == *a.cloned_in(&ctx));

        let c = input_object(&ctx, []);
        let d = input_object(&ctx, []);
        c.append(prop(&ctx, "lineage", Value::list(&ctx, [[c]]).unwrap()).unwrap());
        d.append(prop(&ctx, "lineage", Value::list(&ctx, [[d]]).unwrap()).unwrap());
        assert!(*c != *d);
    }

    #[test]
    fn as_map() {
        let ctx = ASTContext::new();
        let object = input_object(
            &ctx,
            [prop(&ctx, "a", true).unwrap(), prop(&ctx, "b", "text").unwrap()],
        );
        let map = object.as_map(&ctx);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Value::Boolean(BooleanValue { value: true })));

        let arguments = args(&ctx, [arg(&ctx, "id", 7).unwrap()]);
        let map = arguments.as_map(&ctx);
        assert_eq!(map.get("id").unwrap().print().unwrap(), "7");
        assert_eq!(arguments.as_input_object(&ctx).print().unwrap(), "{id: 7}");
    }

    #[test]
    fn type_of_type() {
        let ctx = ASTContext::new();
        let of_type = Type::named("ID").into_nonnull(&ctx).into_list(&ctx);
        assert_eq!(of_type.of_type().name, "ID");
    }
}
