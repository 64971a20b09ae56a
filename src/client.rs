use models::{
    Ingredient, IngredientCreate, IngredientQuery, IngredientUpdate, List, Message, PantryItem,
    PantryItemCreate, PantryItemUpdate, PantryQuery, Recipe, RecipeCreate, RecipeIngredient,
    RecipeIngredientCreate, RecipeIngredientQuery, RecipeIngredientUpdate, RecipeQuery,
    RecipeSuggestion, RecipeUpdate, SearchQuery, SuggestionQuery, User, UserCreate, UserCreated,
    UserUpdate, UserUpdateMe,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const API_PREFIX: &str = "api/v1/";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid URL: {0}")]
    Url(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|status| status.as_u16()),
            ClientError::Url(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url).map_err(|e| ClientError::Url(e.to_string()))?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: Client::new(),
            base,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(API_PREFIX)
            .and_then(|api| api.join(path))
            .map_err(|e| ClientError::Url(e.to_string()))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.url(path)?;
        debug!(%method, %url, "Sending request");

        let request = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        Self::send(self.request(Method::GET, path)?).await
    }

    async fn list<T, Q>(&self, path: &str, query: &Q) -> Result<List<T>, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        Self::send(self.request(Method::GET, path)?.query(query)).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send(self.request(Method::POST, path)?.json(body)).await
    }

    async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send(self.request(Method::PUT, path)?.json(body)).await
    }

    async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send(self.request(Method::PATCH, path)?.json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Message, ClientError> {
        Self::send(self.request(Method::DELETE, path)?).await
    }

    pub async fn health_check(&self) -> Result<bool, ClientError> {
        self.get("utils/health-check").await
    }

    // Users

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("users/me").await
    }

    pub async fn update_me(&self, update: &UserUpdateMe) -> Result<User, ClientError> {
        self.patch("users/me", update).await
    }

    pub async fn user(&self, id: Uuid) -> Result<User, ClientError> {
        self.get(&format!("users/{id}")).await
    }

    pub async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<User, ClientError> {
        self.patch(&format!("users/{id}"), update).await
    }

    /// Also deletes the user's recipes and pantry.
    pub async fn delete_user(&self, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("users/{id}")).await
    }

    pub async fn users(&self, query: &SearchQuery) -> Result<List<User>, ClientError> {
        self.list("users", query).await
    }

    pub async fn create_user(&self, user: &UserCreate) -> Result<UserCreated, ClientError> {
        self.post("users", user).await
    }

    // Ingredients

    pub async fn ingredients(&self, query: &IngredientQuery) -> Result<List<Ingredient>, ClientError> {
        self.list("ingredients", query).await
    }

    pub async fn ingredient(&self, id: Uuid) -> Result<Ingredient, ClientError> {
        self.get(&format!("ingredients/{id}")).await
    }

    pub async fn create_ingredient(&self, ingredient: &IngredientCreate) -> Result<Ingredient, ClientError> {
        self.post("ingredients", ingredient).await
    }

    pub async fn update_ingredient(
        &self,
        id: Uuid,
        update: &IngredientUpdate,
    ) -> Result<Ingredient, ClientError> {
        self.put(&format!("ingredients/{id}"), update).await
    }

    pub async fn delete_ingredient(&self, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("ingredients/{id}")).await
    }

    // Recipes

    pub async fn recipes(&self, query: &RecipeQuery) -> Result<List<Recipe>, ClientError> {
        self.list("recipes", query).await
    }

    pub async fn suggestions(
        &self,
        query: &SuggestionQuery,
    ) -> Result<List<RecipeSuggestion>, ClientError> {
        self.list("recipes/suggestions", query).await
    }

    pub async fn recipe(&self, id: Uuid) -> Result<Recipe, ClientError> {
        self.get(&format!("recipes/{id}")).await
    }

    pub async fn create_recipe(&self, recipe: &RecipeCreate) -> Result<Recipe, ClientError> {
        self.post("recipes", recipe).await
    }

    pub async fn update_recipe(&self, id: Uuid, update: &RecipeUpdate) -> Result<Recipe, ClientError> {
        self.put(&format!("recipes/{id}"), update).await
    }

    pub async fn delete_recipe(&self, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("recipes/{id}")).await
    }

    // Recipe ingredients

    pub async fn recipe_ingredients(
        &self,
        query: &RecipeIngredientQuery,
    ) -> Result<List<RecipeIngredient>, ClientError> {
        self.list("recipe-ingredients", query).await
    }

    pub async fn recipe_ingredient(&self, id: Uuid) -> Result<RecipeIngredient, ClientError> {
        self.get(&format!("recipe-ingredients/{id}")).await
    }

    pub async fn create_recipe_ingredient(
        &self,
        link: &RecipeIngredientCreate,
    ) -> Result<RecipeIngredient, ClientError> {
        self.post("recipe-ingredients", link).await
    }

    pub async fn update_recipe_ingredient(
        &self,
        id: Uuid,
        update: &RecipeIngredientUpdate,
    ) -> Result<RecipeIngredient, ClientError> {
        self.put(&format!("recipe-ingredients/{id}"), update).await
    }

    pub async fn delete_recipe_ingredient(&self, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("recipe-ingredients/{id}")).await
    }

    // Pantry

    pub async fn pantry(&self, query: &PantryQuery) -> Result<List<PantryItem>, ClientError> {
        self.list("user-ingredients", query).await
    }

    pub async fn pantry_item(&self, id: Uuid) -> Result<PantryItem, ClientError> {
        self.get(&format!("user-ingredients/{id}")).await
    }

    pub async fn create_pantry_item(&self, item: &PantryItemCreate) -> Result<PantryItem, ClientError> {
        self.post("user-ingredients", item).await
    }

    pub async fn update_pantry_item(
        &self,
        id: Uuid,
        update: &PantryItemUpdate,
    ) -> Result<PantryItem, ClientError> {
        self.put(&format!("user-ingredients/{id}"), update).await
    }

    pub async fn delete_pantry_item(&self, id: Uuid) -> Result<Message, ClientError> {
        self.delete(&format!("user-ingredients/{id}")).await
    }
}
