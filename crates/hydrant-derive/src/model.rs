use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Error, Fields, GenericArgument, Ident, LitStr, PathArguments, Type};

// derive_model
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

///
/// FieldCfg
/// Parsed `#[model(…)]` field attributes.
///

#[derive(Default)]
struct FieldCfg {
    nested: bool,
    skip: bool,
    no_get: bool,
    no_set: bool,
    format: Option<String>,
    rename: Option<String>,
}

struct FieldSpec<'a> {
    ident: &'a Ident,
    name: String,
    nullable: bool,
    base_ty: &'a Type,
    full_ty: &'a Type,
    kind: Ident,
    cfg: FieldCfg,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic structs",
        ));
    }

    let fields = if let Data::Struct(data) = &input.data {
        if let Fields::Named(named) = &data.fields {
            &named.named
        } else {
            return Err(Error::new_spanned(
                &data.fields,
                "Model can only be derived for structs with named fields",
            ));
        }
    } else {
        return Err(Error::new_spanned(
            ident,
            "Model can only be derived for structs with named fields",
        ));
    };

    let mut specs = Vec::new();
    for field in fields {
        let cfg = parse_field_attrs(field)?;
        if cfg.skip {
            continue;
        }

        if cfg.nested && cfg.format.is_some() {
            return Err(Error::new_spanned(
                field,
                "#[model(format)] cannot be combined with #[model(nested)]",
            ));
        }
        if cfg.nested && (cfg.no_get || cfg.no_set) {
            return Err(Error::new_spanned(
                field,
                "#[model(no_get)] / #[model(no_set)] cannot be combined with #[model(nested)]",
            ));
        }

        let field_ident = field.ident.as_ref().expect("named field");
        let (nullable, base_ty) = split_option(&field.ty);
        let kind = if cfg.nested {
            format_ident!("Nested")
        } else {
            classify(base_ty)
        };
        let name = cfg
            .rename
            .clone()
            .unwrap_or_else(|| field_ident.to_string());

        specs.push(FieldSpec {
            ident: field_ident,
            name,
            nullable,
            base_ty,
            full_ty: &field.ty,
            kind,
            cfg,
        });
    }

    let field_models = specs.iter().map(field_model_entry);
    let get_arms = specs.iter().enumerate().map(|(i, s)| get_arm(i, s));
    let set_arms = specs.iter().enumerate().map(|(i, s)| set_arm(i, s));
    let nested_ref_arms: Vec<_> = specs
        .iter()
        .enumerate()
        .filter(|(_, s)| s.cfg.nested)
        .map(|(i, s)| nested_ref_arm(i, s))
        .collect();
    let nested_mut_arms: Vec<_> = specs
        .iter()
        .enumerate()
        .filter(|(_, s)| s.cfg.nested)
        .map(|(i, s)| nested_mut_arm(i, s))
        .collect();
    let set_nested_arms: Vec<_> = specs
        .iter()
        .enumerate()
        .filter(|(_, s)| s.cfg.nested)
        .map(|(i, s)| set_nested_arm(i, s))
        .collect();

    let field_count = specs.len();
    let uses_value = specs
        .iter()
        .any(|s| s.cfg.nested || !s.cfg.no_set);
    let value_param = if uses_value {
        quote!(value)
    } else {
        quote!(_value)
    };
    let child_param = if nested_ref_arms.is_empty() {
        quote!(_child)
    } else {
        quote!(child)
    };

    Ok(quote! {
        impl ::hydrant::traits::Path for #ident {
            const PATH: &'static str = concat!(module_path!(), "::", stringify!(#ident));
        }

        const _: () = {
            static FIELDS: [::hydrant::model::FieldModel; #field_count] = [
                #(#field_models),*
            ];

            static SHAPE: ::hydrant::model::ModelShape = ::hydrant::model::ModelShape {
                path: <#ident as ::hydrant::traits::Path>::PATH,
                model_name: stringify!(#ident),
                fields: &FIELDS,
                new_boxed: || ::std::boxed::Box::new(<#ident as ::core::default::Default>::default()),
                accessors: ::hydrant::access::TypeAccessors::build::<#ident>,
            };

            impl ::hydrant::traits::ModelSchema for #ident {
                const SHAPE: &'static ::hydrant::model::ModelShape = &SHAPE;
            }

            impl ::hydrant::traits::FieldAccess for #ident {
                fn shape(&self) -> &'static ::hydrant::model::ModelShape {
                    <Self as ::hydrant::traits::ModelSchema>::SHAPE
                }

                fn get_field(
                    &self,
                    index: usize,
                ) -> ::core::option::Option<::hydrant::value::Value> {
                    match index {
                        #(#get_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn set_field(
                    &mut self,
                    index: usize,
                    #value_param: ::hydrant::value::Value,
                ) -> ::core::result::Result<(), ::hydrant::error::FieldWriteError> {
                    match index {
                        #(#set_arms)*
                        _ => ::core::result::Result::Err(
                            ::hydrant::error::FieldWriteError::UnknownIndex { index },
                        ),
                    }
                }

                fn nested_ref(
                    &self,
                    index: usize,
                ) -> ::core::option::Option<&dyn ::hydrant::traits::FieldAccess> {
                    match index {
                        #(#nested_ref_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn nested_mut(
                    &mut self,
                    index: usize,
                ) -> ::core::option::Option<&mut dyn ::hydrant::traits::FieldAccess> {
                    match index {
                        #(#nested_mut_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn set_nested(
                    &mut self,
                    index: usize,
                    #child_param: ::std::boxed::Box<dyn ::core::any::Any>,
                ) -> ::core::result::Result<(), ::hydrant::error::FieldWriteError> {
                    match index {
                        #(#set_nested_arms)*
                        _ => ::core::result::Result::Err(
                            ::hydrant::error::FieldWriteError::NotNested { index },
                        ),
                    }
                }
            }

            impl ::hydrant::traits::Model for #ident {}
        };
    })
}

fn field_model_entry(spec: &FieldSpec<'_>) -> TokenStream {
    let name = &spec.name;
    let kind = &spec.kind;
    let nullable = spec.nullable;
    let has_getter = !spec.cfg.no_get;
    let has_setter = !spec.cfg.no_set;
    let preconstructed = spec.cfg.nested && !spec.nullable;

    let format = match &spec.cfg.format {
        Some(format) => {
            let lit = LitStr::new(format, proc_macro2::Span::call_site());
            quote!(::core::option::Option::Some(#lit))
        }
        None => quote!(::core::option::Option::None),
    };

    let nested = if spec.cfg.nested {
        let base_ty = spec.base_ty;
        quote!(::core::option::Option::Some(
            || <#base_ty as ::hydrant::traits::ModelSchema>::SHAPE
        ))
    } else {
        quote!(::core::option::Option::None)
    };

    quote! {
        ::hydrant::model::FieldModel {
            name: #name,
            kind: ::hydrant::model::FieldKind::#kind,
            nullable: #nullable,
            format: #format,
            has_getter: #has_getter,
            has_setter: #has_setter,
            nested: #nested,
            preconstructed: #preconstructed,
        }
    }
}

fn get_arm(index: usize, spec: &FieldSpec<'_>) -> TokenStream {
    let index = Literal::usize_unsuffixed(index);
    let ident = spec.ident;

    if spec.cfg.nested {
        quote! { #index => ::core::option::Option::None, }
    } else if spec.cfg.no_get {
        quote! { #index => ::core::option::Option::Some(::hydrant::value::Value::Null), }
    } else {
        quote! {
            #index => ::core::option::Option::Some(
                ::hydrant::traits::FieldValue::to_value(&self.#ident),
            ),
        }
    }
}

fn set_arm(index: usize, spec: &FieldSpec<'_>) -> TokenStream {
    let index = Literal::usize_unsuffixed(index);
    let ident = spec.ident;
    let kind = &spec.kind;

    if spec.cfg.nested {
        quote! {
            #index => ::core::result::Result::Err(
                ::hydrant::error::FieldWriteError::Incompatible {
                    value: value.tag(),
                    kind: ::hydrant::model::FieldKind::#kind,
                },
            ),
        }
    } else if spec.cfg.no_set {
        quote! { #index => ::core::result::Result::Ok(()), }
    } else {
        let full_ty = spec.full_ty;
        quote! {
            #index => match <#full_ty as ::hydrant::traits::FieldValue>::from_value(&value) {
                ::core::option::Option::Some(v) => {
                    self.#ident = v;
                    ::core::result::Result::Ok(())
                }
                ::core::option::Option::None => ::core::result::Result::Err(
                    ::hydrant::error::FieldWriteError::Incompatible {
                        value: value.tag(),
                        kind: ::hydrant::model::FieldKind::#kind,
                    },
                ),
            },
        }
    }
}

fn nested_ref_arm(index: usize, spec: &FieldSpec<'_>) -> TokenStream {
    let index = Literal::usize_unsuffixed(index);
    let ident = spec.ident;

    if spec.nullable {
        quote! {
            #index => self
                .#ident
                .as_ref()
                .map(|child| child as &dyn ::hydrant::traits::FieldAccess),
        }
    } else {
        quote! {
            #index => ::core::option::Option::Some(
                &self.#ident as &dyn ::hydrant::traits::FieldAccess,
            ),
        }
    }
}

fn nested_mut_arm(index: usize, spec: &FieldSpec<'_>) -> TokenStream {
    let index = Literal::usize_unsuffixed(index);
    let ident = spec.ident;

    if spec.nullable {
        quote! {
            #index => self
                .#ident
                .as_mut()
                .map(|child| child as &mut dyn ::hydrant::traits::FieldAccess),
        }
    } else {
        quote! {
            #index => ::core::option::Option::Some(
                &mut self.#ident as &mut dyn ::hydrant::traits::FieldAccess,
            ),
        }
    }
}

fn set_nested_arm(index: usize, spec: &FieldSpec<'_>) -> TokenStream {
    let index_lit = Literal::usize_unsuffixed(index);
    let ident = spec.ident;
    let base_ty = spec.base_ty;

    let assign = if spec.nullable {
        quote!(self.#ident = ::core::option::Option::Some(*child);)
    } else {
        quote!(self.#ident = *child;)
    };

    quote! {
        #index_lit => match child.downcast::<#base_ty>() {
            ::core::result::Result::Ok(child) => {
                #assign
                ::core::result::Result::Ok(())
            }
            ::core::result::Result::Err(_) => ::core::result::Result::Err(
                ::hydrant::error::FieldWriteError::ChildType { index: #index },
            ),
        },
    }
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldCfg> {
    let mut cfg = FieldCfg::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                cfg.nested = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                cfg.skip = true;
                Ok(())
            } else if meta.path.is_ident("no_get") {
                cfg.no_get = true;
                Ok(())
            } else if meta.path.is_ident("no_set") {
                cfg.no_set = true;
                Ok(())
            } else if meta.path.is_ident("format") {
                let lit: LitStr = meta.value()?.parse()?;
                cfg.format = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                cfg.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported model attribute; expected nested, skip, no_get, no_set, format, or rename",
                ))
            }
        })?;
    }

    Ok(cfg)
}

/// Strip one `Option<…>` layer; returns (nullable, base type).
fn split_option(ty: &Type) -> (bool, &Type) {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if segment.ident == "Option" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if args.args.len() == 1 {
                        if let Some(GenericArgument::Type(inner)) = args.args.first() {
                            return (true, inner);
                        }
                    }
                }
            }
        }
    }

    (false, ty)
}

/// Map a base field type onto a `FieldKind` variant name.
fn classify(ty: &Type) -> Ident {
    let Type::Path(path) = ty else {
        return format_ident!("Other");
    };
    let Some(segment) = path.path.segments.last() else {
        return format_ident!("Other");
    };

    let name = segment.ident.to_string();
    let kind = match name.as_str() {
        "String" => "Text",
        "bool" => "Bool",
        "i8" | "i16" | "i32" | "i64" => "Int",
        "u8" | "u16" | "u32" | "u64" => "Uint",
        "f32" | "Float32" => "Float32",
        "f64" | "Float64" => "Float64",
        "Decimal" => "Decimal",
        "Date" => "Date",
        "Timestamp" => "Timestamp",
        "Duration" => "Duration",
        "Vec" if vec_of_u8(segment) => "Blob",
        _ => "Other",
    };

    format_ident!("{kind}")
}

fn vec_of_u8(segment: &syn::PathSegment) -> bool {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };
    if args.args.len() != 1 {
        return false;
    }
    let Some(GenericArgument::Type(Type::Path(inner))) = args.args.first() else {
        return false;
    };

    inner.path.is_ident("u8")
}
