//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snaxo::products::{Product, ProductId};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// The product display name
    pub name: String,

    /// Optional product description
    pub description: Option<String>,

    /// Unit price in whole kronor
    pub price: u64,

    /// Pre-discount display price, when the product is on offer
    pub original_price: Option<u64>,

    /// Catalog category
    pub category: String,

    /// Product image URL
    pub image_url: Option<String>,

    /// Whether the product can currently be ordered
    pub in_stock: bool,

    /// Whether the product is featured as popular
    pub is_popular: bool,

    /// Multi-buy promotion family, when applicable
    pub promo_family: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_uuid(),
            name: product.name,
            description: product.description,
            price: product.price,
            original_price: product.original_price,
            category: product.category.as_str().to_string(),
            image_url: product.image_url,
            in_stock: product.in_stock,
            is_popular: product.is_popular,
            promo_family: product.promo_family.map(|family| family.as_str().to_string()),
        }
    }
}

/// Get Product Handler
///
/// Returns a single product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .catalog
        .get_product(ProductId::from_uuid(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use snaxo_app::domain::products::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::{catalog_service, make_product};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_product() -> TestResult {
        let id = ProductId::new();
        let product = make_product(id, "Cola", 25);

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(move |requested| *requested == id)
            .return_once(move |_| Ok(product));

        catalog.expect_list_products().never();

        let response: ProductResponse =
            TestClient::get(format!("http://example.com/products/{id}"))
                .send(&make_service(catalog))
                .await
                .take_json()
                .await?;

        assert_eq!(response.id, id.into_uuid());
        assert_eq!(response.name, "Cola");
        assert_eq!(response.price, 25);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let id = ProductId::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        catalog.expect_list_products().never();

        let res = TestClient::get(format!("http://example.com/products/{id}"))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
