use mapp_genai_api::server;
use mapp_genai_core::gateway::Gateway;

fn main() -> anyhow::Result<()> {
    server::run(Gateway::Observations)
}
