//! Application state initialization.
//!
//! Wires configuration into the concrete service graph: Postgres pool,
//! OpenAI-compatible provider and embedder, fact and history stores, and
//! the chat service.

use recall_core::chat::service::ChatService;
use recall_core::chat::turn::ConversationNode;
use recall_core::memory::extractor::FactExtractor;
use recall_core::memory::store::DEFAULT_RETRIEVAL_K;
use recall_infra::config::AppConfig;
use recall_infra::llm::embedder::OpenAiEmbedder;
use recall_infra::llm::openai_compat::OpenAiCompatProvider;
use recall_infra::postgres::facts::PgFactStore;
use recall_infra::postgres::history::PgHistoryStore;
use recall_infra::postgres::pool::connect;

type Service = ChatService<OpenAiCompatProvider, PgFactStore<OpenAiEmbedder>, PgHistoryStore>;

pub struct AppState {
    pub service: Service,
}

impl AppState {
    /// Load configuration and connect every collaborator.
    ///
    /// Configuration errors and database/schema failures are fatal here;
    /// nothing network-facing runs before `AppConfig::load` succeeds.
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::load().await?;
        config.log_startup();

        let pool = connect(&config.pg_conn_str, config.embedding_dim).await?;

        let provider =
            OpenAiCompatProvider::new(&config.openai_api_key, &config.openai_base_url);
        let embedder = OpenAiEmbedder::new(
            &config.openai_api_key,
            &config.openai_base_url,
            config.embedding_model.clone(),
            config.embedding_dim as usize,
        );

        let facts = PgFactStore::new(pool.clone(), embedder);
        let history = PgHistoryStore::new(pool);

        let node = ConversationNode::new(
            provider,
            facts,
            FactExtractor::new(config.fact_prompt.clone()),
            config.system_prompt.clone(),
            config.chat_model.clone(),
            DEFAULT_RETRIEVAL_K,
        );

        Ok(Self {
            service: ChatService::new(node, history),
        })
    }
}
