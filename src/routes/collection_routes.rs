use axum::{
    routing::get,
    Router,
};

use crate::api::collections::{
    create_record, delete_record, get_record, list_records, patch_record, replace_record,
};
use crate::state::AppState;

pub fn create_collection_router() -> Router<AppState> {
    Router::new()
        .route("/:collection", get(list_records).post(create_record))
        .route(
            "/:collection/:id",
            get(get_record)
                .put(replace_record)
                .patch(patch_record)
                .delete(delete_record),
        )
}
