//! The seam the admin card talks to.
//!
//! [`CarService`] mirrors the four car endpoints so cards and panels can
//! run against [`CarApi`] in production and a scripted implementation in
//! tests.

use async_trait::async_trait;
use rental_core::car::Car;
use rental_core::form::CarForm;
use rental_core::types::DbId;

use crate::api::{CarApi, ClientError};
use crate::envelope::ApiOutcome;

#[async_trait]
pub trait CarService: Send + Sync {
    async fn get_car_list(&self) -> Result<ApiOutcome<Vec<Car>>, ClientError>;

    async fn add_car(&self, form: &CarForm) -> Result<ApiOutcome<String>, ClientError>;

    async fn update_car(&self, id: DbId, form: &CarForm)
        -> Result<ApiOutcome<String>, ClientError>;

    async fn delete_car(&self, id: DbId) -> Result<ApiOutcome<String>, ClientError>;
}

#[async_trait]
impl CarService for CarApi {
    async fn get_car_list(&self) -> Result<ApiOutcome<Vec<Car>>, ClientError> {
        CarApi::get_car_list(self).await
    }

    async fn add_car(&self, form: &CarForm) -> Result<ApiOutcome<String>, ClientError> {
        CarApi::add_car(self, form).await
    }

    async fn update_car(
        &self,
        id: DbId,
        form: &CarForm,
    ) -> Result<ApiOutcome<String>, ClientError> {
        CarApi::update_car(self, id, form).await
    }

    async fn delete_car(&self, id: DbId) -> Result<ApiOutcome<String>, ClientError> {
        CarApi::delete_car(self, id).await
    }
}
