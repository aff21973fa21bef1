//! # Operation Parameter Sets
//!
//! The query options a GET operation carries, in the order assemblers emit
//! them. Disabled options are simply left out.

use super::context::{NavigationSource, ODataContext};
use super::query_options::{create_expand, create_order_by, create_select};
use super::references::{create_count, create_filter, create_search, create_skip, create_top};
use crate::error::AppResult;
use utoipa::openapi::path::Parameter;
use utoipa::openapi::RefOr;

/// Query options for reading a collection: `$top`, `$skip`, `$search`,
/// `$filter`, `$count`, `$orderby`, `$select`, `$expand`.
pub fn collection_query_parameters(
    ctx: &ODataContext<'_>,
    source: &NavigationSource<'_>,
) -> AppResult<Vec<RefOr<Parameter>>> {
    let (target, entity_type) = source.resolve(ctx.model())?;

    let references = [
        create_top(ctx, &target),
        create_skip(ctx, &target),
        create_search(ctx, &target),
        create_filter(ctx, &target),
        create_count(ctx, &target),
    ];
    let inline = [
        create_order_by(ctx, &target, entity_type),
        create_select(ctx, &target, entity_type),
        create_expand(ctx, &target, entity_type),
    ];

    Ok(references
        .into_iter()
        .flatten()
        .chain(inline.into_iter().flatten().map(RefOr::T))
        .collect())
}

/// Query options for reading a single entity: `$select`, `$expand`.
pub fn entity_query_parameters(
    ctx: &ODataContext<'_>,
    source: &NavigationSource<'_>,
) -> AppResult<Vec<RefOr<Parameter>>> {
    let (target, entity_type) = source.resolve(ctx.model())?;

    Ok([
        create_select(ctx, &target, entity_type),
        create_expand(ctx, &target, entity_type),
    ]
    .into_iter()
    .flatten()
    .map(RefOr::T)
    .collect())
}
