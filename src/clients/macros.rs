/// Generates the collection methods shared by every keyed-record client:
/// list, subscribe, count, create (push), update (merge) and delete.
macro_rules! impl_collection_client {
    ($client_name:ident, $record:ty, $payload:ty, $record_snake:ident, $plural_snake:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(store: $crate::store::StoreClient) -> Self {
                    Self { store }
                }

                fn [<$record_snake _path>](id: &str) -> String {
                    format!("{}/{}", <$record as $crate::domain::Record>::COLLECTION, id)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural_snake>](&self) -> Result<Vec<$record>, $crate::store::StoreError> {
                    tracing::debug!("Sending request");
                    let snapshot = self.store.get(<$record as $crate::domain::Record>::COLLECTION).await?;
                    Ok($crate::domain::normalize_collection::<$record>(&snapshot))
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<subscribe_ $plural_snake>](&self) -> Result<$crate::store::Subscription, $crate::store::StoreError> {
                    tracing::debug!("Sending request");
                    self.store.subscribe(<$record as $crate::domain::Record>::COLLECTION).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<count_ $plural_snake>](&self) -> Result<usize, $crate::store::StoreError> {
                    let snapshot = self.store.get(<$record as $crate::domain::Record>::COLLECTION).await?;
                    Ok(snapshot.as_object().map_or(0, |children| children.len()))
                }

                #[tracing::instrument(skip(self, payload))]
                pub async fn [<create_ $record_snake>](&self, payload: &$payload) -> Result<String, $crate::store::StoreError> {
                    tracing::debug!("Sending request");
                    let body = serde_json::to_value(payload)?;
                    self.store.push(<$record as $crate::domain::Record>::COLLECTION, body).await
                }

                #[tracing::instrument(skip(self, payload))]
                pub async fn [<update_ $record_snake>](&self, id: &str, payload: &$payload) -> Result<(), $crate::store::StoreError> {
                    tracing::debug!("Sending request");
                    let fields = $crate::clients::into_fields(payload)?;
                    self.store.update(&Self::[<$record_snake _path>](id), fields).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $record_snake>](&self, id: &str) -> Result<(), $crate::store::StoreError> {
                    tracing::debug!("Sending request");
                    self.store.remove(&Self::[<$record_snake _path>](id)).await
                }
            }
        }
    };
}
