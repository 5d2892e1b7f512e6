// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Resolves one or more components from the request catalog, turning
/// injection failures into internal API errors
macro_rules! from_catalog_n {
    ($catalog:ident, $T:ty) => {
        $catalog
            .get_one::<$T>()
            .map_err(|e| http_common::ApiError::from(internal_error::ErrorIntoInternal::int_err(e)))?
    };
    ($catalog:ident, $T:ty, $($Ts:ty),+) => {
        (
            from_catalog_n!($catalog, $T),
            $( from_catalog_n!($catalog, $Ts) ),+
        )
    };
}

pub(crate) use from_catalog_n;
