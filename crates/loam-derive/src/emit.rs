//! Token emission for the entity contract.

use proc_macro2::TokenStream;
use quote::quote;

use crate::node::{ColumnField, ColumnKindArg, EntityNode, FieldKind, JoinField, StrategyArg};

pub fn entity(node: &EntityNode) -> TokenStream {
    let ident = &node.ident;
    let ident_str = ident.to_string();
    let table = &node.table;
    let fields = node.order.iter().map(|kind| match kind {
        FieldKind::Column(i) => column_model(&node.columns[*i]),
        FieldKind::Join(i) => join_model(&node.joins[*i]),
    });
    let get_arms = node.columns.iter().map(get_arm);
    let set_arms = node.columns.iter().map(set_arm);
    let hydrate = hydrate_impl(node);

    quote! {
        impl ::loam::traits::Entity for #ident {
            const MODEL: &'static ::loam::model::EntityModel = &::loam::model::EntityModel {
                path: concat!(module_path!(), "::", #ident_str),
                entity_name: #ident_str,
                table: #table,
                fields: &[#(#fields),*],
            };

            fn get(&self, field: &str) -> Option<::loam::value::Value> {
                match field {
                    #(#get_arms)*
                    _ => None,
                }
            }

            fn set(
                &mut self,
                field: &str,
                value: ::loam::value::Value,
            ) -> Result<(), ::loam::coerce::CoerceError> {
                match field {
                    #(#set_arms)*
                    _ => {
                        return Err(::loam::coerce::CoerceError::UnknownField {
                            field: field.to_string(),
                        });
                    }
                }

                Ok(())
            }

            #hydrate
        }
    }
}

fn column_kind(kind: ColumnKindArg) -> TokenStream {
    match kind {
        ColumnKindArg::Bool => quote!(::loam::model::ColumnKind::Bool),
        ColumnKindArg::Int => quote!(::loam::model::ColumnKind::Int),
        ColumnKindArg::Float => quote!(::loam::model::ColumnKind::Float),
        ColumnKindArg::Text => quote!(::loam::model::ColumnKind::Text),
        ColumnKindArg::DateTime => quote!(::loam::model::ColumnKind::DateTime),
        ColumnKindArg::Json => quote!(::loam::model::ColumnKind::Json),
    }
}

fn column_model(column: &ColumnField) -> TokenStream {
    let name = column.ident.to_string();
    let column_name = &column.column;
    let kind = column_kind(column.kind);
    let mut model = quote! {
        ::loam::model::ColumnModel::new(#column_name, #kind)
    };

    if column.primary_key {
        model = quote!(#model.primary_key());
    }
    if column.not_null {
        model = quote!(#model.not_null());
    }
    if !column.insertable {
        model = quote!(#model.not_insertable());
    }
    if !column.updatable {
        model = quote!(#model.not_updatable());
    }
    match column.autoincrement {
        Some(StrategyArg::Uuid) => model = quote!(#model.auto_uuid()),
        Some(StrategyArg::Identity) => model = quote!(#model.auto_identity()),
        None => {}
    }
    if let Some(generator) = &column.generator {
        model = quote!(#model.generator(#generator));
    }
    if let Some(default) = &column.default {
        let value = default_value(default);

        model = quote!(#model.default_value(#value));
    }
    if let Some(format) = &column.format {
        model = quote!(#model.datetime_format(#format));
    }

    quote! {
        ::loam::model::FieldModel::column(#name, #model)
    }
}

fn default_value(lit: &syn::Lit) -> TokenStream {
    match lit {
        syn::Lit::Str(s) => quote!(::loam::model::DefaultValue::Text(#s)),
        syn::Lit::Int(i) => quote!(::loam::model::DefaultValue::Int(#i)),
        syn::Lit::Float(f) => quote!(::loam::model::DefaultValue::Float(#f)),
        syn::Lit::Bool(b) => quote!(::loam::model::DefaultValue::Bool(#b)),
        _ => quote!(::loam::model::DefaultValue::Null),
    }
}

fn join_model(join: &JoinField) -> TokenStream {
    let name = join.ident.to_string();
    let column = &join.column;
    let target = &join.target;

    quote! {
        ::loam::model::FieldModel::join(#name, ::loam::model::JoinModel {
            column: #column,
            target: <#target as ::loam::traits::Entity>::model,
        })
    }
}

fn get_arm(column: &ColumnField) -> TokenStream {
    let ident = &column.ident;
    let name = ident.to_string();

    quote! {
        #name => self.#ident.clone().map(::loam::coerce::IntoValue::into_value),
    }
}

fn set_arm(column: &ColumnField) -> TokenStream {
    let ident = &column.ident;
    let name = ident.to_string();

    quote! {
        #name => self.#ident = ::loam::coerce::FromValue::from_value(value)?,
    }
}

fn hydrate_impl(node: &EntityNode) -> TokenStream {
    if node.joins.is_empty() {
        return TokenStream::new();
    }

    let resolutions = node.joins.iter().map(|join| {
        let field = &join.ident;
        let target = &join.target;
        let owner = node
            .owning_column(join)
            .map(|c| c.ident.clone())
            .unwrap_or_else(|| join.ident.clone());

        quote! {
            let key = self
                .#owner
                .clone()
                .map_or(::loam::value::Value::Null, ::core::convert::Into::into);

            self.#field = engine.resolve_join::<#target>(ctx, &key)?;
        }
    });

    quote! {
        fn hydrate_joins<C: ::loam::connector::Connector>(
            &mut self,
            engine: &::loam::engine::Engine<C>,
            ctx: &mut ::loam::engine::SessionContext,
        ) -> Result<(), ::loam::error::Error> {
            #(#resolutions)*

            Ok(())
        }
    }
}
