//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use snaxo::products::Category;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the in-stock catalog, popular products first, optionally
/// filtered by category.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = category
        .into_inner()
        .map(|raw| {
            raw.parse::<Category>()
                .map_err(|_error| StatusError::bad_request().brief("Unknown category"))
        })
        .transpose()?;

    let products = state
        .app
        .catalog
        .list_products(category)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use snaxo::products::ProductId;
    use snaxo_app::domain::products::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::{catalog_service, make_product};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let cola = ProductId::new();
        let crisps = ProductId::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|category| category.is_none())
            .return_once(move |_| {
                Ok(vec![
                    make_product(cola, "Cola", 25),
                    make_product(crisps, "Crisps", 22),
                ])
            });

        catalog.expect_get_product().never();

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await
            .take_json()
            .await?;

        let ids: Vec<uuid::Uuid> = response.products.iter().map(|p| p.id).collect();

        assert_eq!(ids, [cola.into_uuid(), crisps.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_category_filter() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|category| *category == Some(Category::Drinks))
            .return_once(|_| Ok(vec![]));

        catalog.expect_get_product().never();

        let res = TestClient::get("http://example.com/products?category=drinks")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_products().never();
        catalog.expect_get_product().never();

        let res = TestClient::get("http://example.com/products?category=sushi")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .return_once(|_| Err(CatalogServiceError::InvalidData));

        catalog.expect_get_product().never();

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
