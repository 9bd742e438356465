//! [`Resource`] implementations over the admin HTTP API.

use async_trait::async_trait;
use storefront_core::types::DbId;
use storefront_db::models::category::{Category, CreateCategory, UpdateCategory};
use storefront_db::models::fabric::{CreateFabric, Fabric, UpdateFabric};
use storefront_db::models::product::{CreateProduct, Product, UpdateProduct};
use storefront_db::models::section::{CreateSection, Section, UpdateSection};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::screen::Resource;

pub struct Categories {
    client: ApiClient,
}

impl Categories {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for Categories {
    type Item = Category;
    type Draft = CreateCategory;
    const ENTITY: &'static str = "Category";

    fn id(item: &Category) -> DbId {
        item.id
    }

    fn draft_from(item: &Category) -> CreateCategory {
        CreateCategory {
            name: item.name.clone(),
            slug: item.slug.clone(),
        }
    }

    fn draft_name(draft: &CreateCategory) -> &str {
        &draft.name
    }

    async fn list(&self) -> Result<Vec<Category>, ClientError> {
        self.client.get("/admin/categories").await
    }

    async fn create(&self, draft: &CreateCategory) -> Result<Category, ClientError> {
        self.client.post("/admin/categories", draft).await
    }

    async fn update(&self, id: DbId, draft: &CreateCategory) -> Result<Category, ClientError> {
        let patch = UpdateCategory {
            name: Some(draft.name.clone()),
            slug: Some(draft.slug.clone()),
        };
        self.client
            .put(&format!("/admin/categories/{id}"), &patch)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/admin/categories/{id}")).await
    }
}

pub struct Sections {
    client: ApiClient,
}

impl Sections {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for Sections {
    type Item = Section;
    type Draft = CreateSection;
    const ENTITY: &'static str = "Section";

    fn id(item: &Section) -> DbId {
        item.id
    }

    fn draft_from(item: &Section) -> CreateSection {
        CreateSection {
            name: item.name.clone(),
            slug: item.slug.clone(),
            category_id: item.category_id,
        }
    }

    fn draft_name(draft: &CreateSection) -> &str {
        &draft.name
    }

    async fn list(&self) -> Result<Vec<Section>, ClientError> {
        self.client.get("/admin/sections").await
    }

    async fn create(&self, draft: &CreateSection) -> Result<Section, ClientError> {
        self.client.post("/admin/sections", draft).await
    }

    async fn update(&self, id: DbId, draft: &CreateSection) -> Result<Section, ClientError> {
        let patch = UpdateSection {
            name: Some(draft.name.clone()),
            slug: Some(draft.slug.clone()),
            category_id: Some(draft.category_id),
        };
        self.client.put(&format!("/admin/sections/{id}"), &patch).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/admin/sections/{id}")).await
    }
}

pub struct Fabrics {
    client: ApiClient,
}

impl Fabrics {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for Fabrics {
    type Item = Fabric;
    type Draft = CreateFabric;
    const ENTITY: &'static str = "Fabric";

    fn id(item: &Fabric) -> DbId {
        item.id
    }

    fn draft_from(item: &Fabric) -> CreateFabric {
        CreateFabric {
            name: item.name.clone(),
            season: Some(item.season),
        }
    }

    fn draft_name(draft: &CreateFabric) -> &str {
        &draft.name
    }

    async fn list(&self) -> Result<Vec<Fabric>, ClientError> {
        self.client.get("/admin/fabrics").await
    }

    async fn create(&self, draft: &CreateFabric) -> Result<Fabric, ClientError> {
        self.client.post("/admin/fabrics", draft).await
    }

    async fn update(&self, id: DbId, draft: &CreateFabric) -> Result<Fabric, ClientError> {
        let patch = UpdateFabric {
            name: Some(draft.name.clone()),
            season: draft.season,
        };
        self.client.put(&format!("/admin/fabrics/{id}"), &patch).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/admin/fabrics/{id}")).await
    }
}

pub struct Products {
    client: ApiClient,
}

impl Products {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for Products {
    type Item = Product;
    type Draft = CreateProduct;
    const ENTITY: &'static str = "Product";

    fn id(item: &Product) -> DbId {
        item.id
    }

    fn draft_from(item: &Product) -> CreateProduct {
        CreateProduct {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            discount_price: item.discount_price,
            stock: item.stock,
            category_id: item.category_id,
            section_id: item.section_id,
            fabric_id: item.fabric_id,
            gender: item.gender,
            season: item.season,
        }
    }

    fn draft_name(draft: &CreateProduct) -> &str {
        &draft.name
    }

    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        self.client.get("/admin/products").await
    }

    async fn create(&self, draft: &CreateProduct) -> Result<Product, ClientError> {
        self.client.post("/admin/products", draft).await
    }

    async fn update(&self, id: DbId, draft: &CreateProduct) -> Result<Product, ClientError> {
        let patch = UpdateProduct {
            name: Some(draft.name.clone()),
            description: Some(draft.description.clone()),
            price: Some(draft.price),
            discount_price: Some(draft.discount_price),
            stock: draft.stock,
            category_id: Some(draft.category_id),
            section_id: Some(draft.section_id),
            fabric_id: Some(draft.fabric_id),
            gender: Some(draft.gender),
            season: Some(draft.season),
        };
        self.client.put(&format!("/admin/products/{id}"), &patch).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/admin/products/{id}")).await
    }
}
