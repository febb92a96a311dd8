macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

/// Generates a `get` that maps a missing row to the domain's `NotFound`.
macro_rules! impl_client_get {
    ($client_name:ident, $entity:ty, $error:ident) => {
        impl $client_name {
            #[tracing::instrument(skip(self))]
            pub async fn get(
                &self,
                id: <$entity as crate::actor_framework::Entity>::Id,
            ) -> Result<$entity, $error> {
                tracing::debug!("Sending request");
                self.inner
                    .get(id.clone())
                    .await
                    .map_err(|e| $error::ActorCommunicationError(e.to_string()))?
                    .ok_or($error::NotFound(id))
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_get!($client_name, $entity, $error);
    };
}
