//! Type classification.
//!
//! Maps a native type spelling to a [`TypeRef`]: a category, a set of
//! flags, and (for builtins and enums) the underlying builtin kind.
//!
//! ## Rules
//!
//! - One outer pointer or reference is stripped and recorded as the source
//!   kind. A non-const reference parameter is an output; so is a non-const
//!   pointer parameter to a value-like type. Returns are never outputs.
//! - `std::vector<T>` / `Vector<T>` set the array flag; the remaining flags
//!   describe the element.
//! - `std::shared_ptr<T>` / `SPtr<T>`, `ResourceHandle<T>`,
//!   `GameObjectHandle<T>` and the `H*` handle typedefs replace the source
//!   kind.
//! - Strings, paths, `Flags<E>`, `TAsyncOp<T>`, `MonoObject*` and
//!   `ScriptObjectBase*` map to their dedicated categories and flags.
//! - Everything else is looked up in the [`TypeMap`].

use sbgen_core::{BuiltinKind, ClassifyError, Direction, TypeCategory, TypeFlags, TypeRef};
use sbgen_parser::{TemplateArg, TypeExpr, TypeSuffix};
use sbgen_registry::TypeMap;

/// Name of the event template whose fields become managed events.
pub const EVENT_TEMPLATE: &str = "Event";

/// A successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub ty: TypeRef,
    /// Set when a user type was not registered. The reference is then
    /// treated as a builtin spelled with the source name.
    pub unknown: Option<String>,
}

/// Outer indirection of a spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outer {
    Value,
    Pointer,
    Reference,
    RValueReference,
}

/// Classifies type spellings against the registered user types.
pub struct Classifier<'a> {
    types: &'a TypeMap,
}

/// Context carried while resolving nested wrappers.
#[derive(Default, Clone, Copy)]
struct Wrapping {
    in_container: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(types: &'a TypeMap) -> Self {
        Self { types }
    }

    /// Classify a spelling for the given kind of position.
    ///
    /// ```
    /// use sbgen_compiler::Classifier;
    /// use sbgen_core::{Direction, TypeCategory, TypeFlags};
    /// use sbgen_registry::{TypeMap, UserType};
    ///
    /// let mut types = TypeMap::new();
    /// types.insert(UserType::new("Mesh", TypeCategory::Resource)).unwrap();
    ///
    /// let classified = Classifier::new(&types)
    ///     .classify("const std::vector<ResourceHandle<Mesh>>&", Direction::Parameter)
    ///     .unwrap();
    /// assert_eq!(classified.ty.category, TypeCategory::Resource);
    /// assert!(classified.ty.flags.contains(TypeFlags::ARRAY | TypeFlags::SRC_RESOURCE_HANDLE));
    /// assert!(!classified.ty.is_output());
    /// ```
    pub fn classify(&self, spelling: &str, direction: Direction) -> Result<Classified, ClassifyError> {
        let expr = TypeExpr::parse(spelling)?;
        self.classify_expr(&expr, direction)
    }

    /// Classify an already parsed type.
    pub fn classify_expr(
        &self,
        expr: &TypeExpr,
        direction: Direction,
    ) -> Result<Classified, ClassifyError> {
        let outer = outer_kind(expr)?;
        let base = expr.without_suffixes();

        let mut unknown = None;
        let mut ty = self.resolve(&base, outer, Wrapping::default(), &mut unknown)?;

        // The outer indirection only becomes the source kind when no
        // wrapper already chose one.
        if !ty.flags.intersects(TypeFlags::SOURCE_KIND) && !ty.is_array() {
            match outer {
                Outer::Pointer => ty.flags |= TypeFlags::SRC_PTR,
                Outer::Reference | Outer::RValueReference => ty.flags |= TypeFlags::SRC_REF,
                Outer::Value => {}
            }
        }

        if direction.is_parameter() && !expr.is_const && !ty.is_async_op() {
            let output = match outer {
                Outer::Reference => true,
                Outer::Pointer => ty.category.is_value_like() && !ty.is_array(),
                _ => false,
            };
            if output {
                ty.flags |= TypeFlags::OUTPUT;
            }
        }

        self.check_direction(&ty, expr, direction)?;
        Ok(Classified { ty, unknown })
    }

    fn check_direction(
        &self,
        ty: &TypeRef,
        expr: &TypeExpr,
        direction: Direction,
    ) -> Result<(), ClassifyError> {
        let invalid = || ClassifyError::InvalidDirection {
            name: expr.name().to_string(),
            direction,
        };
        if ty.is_void() && direction != Direction::Return {
            return Err(ClassifyError::Void { direction });
        }
        match direction {
            Direction::Return => {
                if ty.category == TypeCategory::GuiElement {
                    return Err(invalid());
                }
            }
            Direction::Parameter | Direction::Field => {
                let input = !ty.is_output();
                if (ty.is_async_op() || ty.category == TypeCategory::MonoObject) && input {
                    return Err(invalid());
                }
                if ty.category == TypeCategory::GuiElement && !input {
                    return Err(invalid());
                }
            }
        }
        Ok(())
    }

    /// Resolve a suffix-free type expression.
    fn resolve(
        &self,
        expr: &TypeExpr,
        outer: Outer,
        wrapping: Wrapping,
        unknown: &mut Option<String>,
    ) -> Result<TypeRef, ClassifyError> {
        let name = expr.name();
        let qualified = expr.qualified_name();

        if let Some(kind) = BuiltinKind::from_spelling(&qualified) {
            if kind == BuiltinKind::Void && outer == Outer::Pointer {
                return Err(ClassifyError::UnsupportedCategory {
                    name: "void*".into(),
                });
            }
            return Ok(TypeRef::builtin(kind));
        }

        match name {
            "vector" | "Vector" => {
                if wrapping.in_container {
                    return Err(ClassifyError::NestedContainer {
                        spelling: expr.to_string(),
                    });
                }
                let element = first_type_arg(expr)?;
                let mut ty = self.resolve_element(
                    element,
                    Wrapping { in_container: true },
                    unknown,
                )?;
                ty.flags |= TypeFlags::ARRAY;
                Ok(ty)
            }
            "TAsyncOp" | "AsyncOp" => {
                if wrapping.in_container {
                    return Err(ClassifyError::NestedContainer {
                        spelling: expr.to_string(),
                    });
                }
                let element = first_type_arg(expr)?;
                let mut ty = self.resolve_element(
                    element,
                    Wrapping { in_container: true },
                    unknown,
                )?;
                ty.flags |= TypeFlags::ASYNC_OP;
                Ok(ty)
            }
            "basic_string" => {
                let element = first_type_arg(expr)?;
                match BuiltinKind::from_spelling(&element.qualified_name()) {
                    Some(BuiltinKind::WChar) => Ok(wstring()),
                    Some(BuiltinKind::Int8) => Ok(string()),
                    _ => Err(ClassifyError::UnsupportedCategory {
                        name: expr.to_string(),
                    }),
                }
            }
            "string" | "String" => Ok(string()),
            "wstring" | "WString" => Ok(wstring()),
            "Path" => Ok(TypeRef::new("Path", TypeCategory::Path)),
            "shared_ptr" | "SPtr" => {
                let element = first_type_arg(expr)?;
                let mut ty = self.resolve(element, Outer::Value, wrapping, unknown)?;
                if ty.category.is_handle() {
                    return Err(ClassifyError::SharedPtrToHandle {
                        name: ty.name,
                        category: ty.category,
                    });
                }
                ty.flags |= TypeFlags::SRC_SHARED_PTR;
                Ok(ty)
            }
            "ResourceHandle" | "TResourceHandle" => {
                let element = first_type_arg(expr)?;
                let ty = self.resolve(element, Outer::Value, wrapping, unknown)?;
                resource_handle(ty)
            }
            "GameObjectHandle" => {
                let element = first_type_arg(expr)?;
                let ty = self.resolve(element, Outer::Value, wrapping, unknown)?;
                game_object_handle(ty)
            }
            "HSceneObject" => game_object_handle(TypeRef::new(
                "SceneObject",
                TypeCategory::SceneObject,
            )),
            "HComponent" => {
                game_object_handle(TypeRef::new("Component", TypeCategory::Component))
            }
            "Flags" => {
                let element = first_type_arg(expr)?;
                let mut ty = self.resolve(element, Outer::Value, wrapping, unknown)?;
                if ty.category != TypeCategory::Enum {
                    return Err(ClassifyError::InvalidHandleTarget {
                        wrapper: "Flags",
                        name: ty.name,
                        category: ty.category,
                    });
                }
                ty.flags |= TypeFlags::FLAGS_ENUM;
                Ok(ty)
            }
            "MonoObject" if outer == Outer::Pointer => {
                Ok(TypeRef::new("MonoObject", TypeCategory::MonoObject))
            }
            "ScriptObjectBase" if outer == Outer::Pointer => {
                Ok(TypeRef::new("ScriptObjectBase", TypeCategory::ScriptObject)
                    .with_flags(TypeFlags::SCRIPT_OBJECT))
            }
            _ => self.resolve_user(expr, unknown),
        }
    }

    /// Resolve the element of a container, which may carry its own pointer.
    fn resolve_element(
        &self,
        element: &TypeExpr,
        wrapping: Wrapping,
        unknown: &mut Option<String>,
    ) -> Result<TypeRef, ClassifyError> {
        let outer = outer_kind(element)?;
        let base = element.without_suffixes();
        let mut ty = self.resolve(&base, outer, wrapping, unknown)?;
        if !ty.flags.intersects(TypeFlags::SOURCE_KIND) && !ty.is_array() {
            match outer {
                Outer::Pointer => ty.flags |= TypeFlags::SRC_PTR,
                Outer::Reference | Outer::RValueReference => ty.flags |= TypeFlags::SRC_REF,
                Outer::Value => {}
            }
        }
        Ok(ty)
    }

    fn resolve_user(
        &self,
        expr: &TypeExpr,
        unknown: &mut Option<String>,
    ) -> Result<TypeRef, ClassifyError> {
        let name = expr.name();
        let key = instantiation_name(expr);

        if let Some(user) = self.types.get(&key) {
            let mut ty = TypeRef::new(key, user.category);
            if user.category == TypeCategory::Enum {
                ty.builtin = Some(user.underlying.unwrap_or(BuiltinKind::Int32));
            }
            return Ok(ty);
        }

        if !expr.template_args.is_empty() {
            return Err(ClassifyError::UnknownTemplate {
                name: name.to_string(),
            });
        }

        // `HMesh` and friends: handle typedefs for registered handle types.
        if let Some(target) = name.strip_prefix('H')
            && let Some(user) = self.types.get(target)
        {
            let ty = TypeRef::new(target, user.category);
            match user.category {
                TypeCategory::Resource => return resource_handle(ty),
                TypeCategory::Component | TypeCategory::SceneObject => {
                    return game_object_handle(ty);
                }
                _ => {}
            }
        }

        *unknown = Some(name.to_string());
        Ok(TypeRef::new(name, TypeCategory::Builtin).with_flags(TypeFlags::BUILTIN))
    }
}

fn outer_kind(expr: &TypeExpr) -> Result<Outer, ClassifyError> {
    if expr.pointer_depth() > 1 || expr.suffixes.len() > 1 {
        return Err(ClassifyError::PointerToPointer {
            spelling: expr.to_string(),
        });
    }
    Ok(match expr.suffixes.first() {
        None => Outer::Value,
        Some(TypeSuffix::Pointer { .. }) => Outer::Pointer,
        Some(TypeSuffix::Reference) => Outer::Reference,
        Some(TypeSuffix::RValueReference) => Outer::RValueReference,
    })
}

fn first_type_arg(expr: &TypeExpr) -> Result<&TypeExpr, ClassifyError> {
    match expr.template_args.first() {
        Some(TemplateArg::Type(ty)) => Ok(ty),
        _ => Err(ClassifyError::TemplateArity {
            name: expr.name().to_string(),
            expected: 1,
        }),
    }
}

/// Type map key of a (possibly templated) type: `Name` or `Name<A, B>`.
pub fn instantiation_name(expr: &TypeExpr) -> String {
    if expr.template_args.is_empty() {
        return expr.name().to_string();
    }
    let args: Vec<String> = expr
        .template_args
        .iter()
        .map(|arg| match arg {
            TemplateArg::Type(ty) => ty.to_string(),
            TemplateArg::Value(value) => value.clone(),
            TemplateArg::Function(sig) => format!("{}(...)", sig.ret),
        })
        .collect();
    format!("{}<{}>", expr.name(), args.join(", "))
}

fn string() -> TypeRef {
    TypeRef::new("String", TypeCategory::String).with_flags(TypeFlags::STRING)
}

fn wstring() -> TypeRef {
    TypeRef::new("WString", TypeCategory::WString).with_flags(TypeFlags::WSTRING)
}

fn resource_handle(mut ty: TypeRef) -> Result<TypeRef, ClassifyError> {
    if ty.category != TypeCategory::Resource {
        return Err(ClassifyError::InvalidHandleTarget {
            wrapper: "ResourceHandle",
            name: ty.name,
            category: ty.category,
        });
    }
    ty.flags |= TypeFlags::SRC_RESOURCE_HANDLE;
    Ok(ty)
}

fn game_object_handle(mut ty: TypeRef) -> Result<TypeRef, ClassifyError> {
    if !ty.category.is_game_object() {
        return Err(ClassifyError::InvalidHandleTarget {
            wrapper: "GameObjectHandle",
            name: ty.name,
            category: ty.category,
        });
    }
    ty.flags |= TypeFlags::SRC_GAME_OBJECT_HANDLE;
    Ok(ty)
}

/// Check if a parsed type is the event template.
pub fn is_event(expr: &TypeExpr) -> bool {
    expr.name() == EVENT_TEMPLATE
        && matches!(expr.template_args.as_slice(), [TemplateArg::Function(_)])
}
