use crate::model::{generate_id, KbArticle, KbCategory, Personnel};
use crate::seed::batch::insert_in_batches;
use crate::seed::context::SeedContext;
use crate::seed::data::{KB_CATEGORIES, KB_TOPICS};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_up_to, minutes_before, pick, slug};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeBase {
    pub categories: Vec<KbCategory>,
    pub articles: Vec<KbArticle>,
}

impl KnowledgeBase {
    pub fn len(&self) -> usize {
        self.categories.len() + self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub async fn seed_knowledge_base<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    categories: usize,
    max_articles_per_category: usize,
    personnel: &[Personnel],
) -> Result<KnowledgeBase, SeedError> {
    let step = SeedStep::KnowledgeBase;
    if personnel.is_empty() {
        ctx.warn(step, "No personnel available; articles will have no author");
    }

    let now = ctx.now();
    let rng = ctx.rng();
    let mut kb = KnowledgeBase::default();
    for name in KB_CATEGORIES.choose_multiple(rng, categories) {
        let category = KbCategory {
            id: generate_id(),
            name: name.to_string(),
            description: Some(format!("Articles about {}", name.to_lowercase())),
            created_at: now,
        };
        let article_count = count_up_to(rng, max_articles_per_category);
        for topic in KB_TOPICS.choose_multiple(rng, article_count) {
            let author = pick(rng, personnel);
            kb.articles.push(KbArticle {
                id: generate_id(),
                category_id: category.id.clone(),
                title: format!("{}: {}", name, topic),
                content: format!(
                    "{} for {}. Maintained by {}.",
                    topic,
                    name,
                    author.map_or("the operations team".to_string(), |person| person.full_name())
                ),
                author_id: author.map(|person| person.id.clone()),
                tags: vec![slug(name), slug(topic)],
                published: rng.gen_bool(0.8),
                views: rng.gen_range(0..2_000),
                created_at: minutes_before(rng, now, 60 * 24 * 180),
            });
        }
        kb.categories.push(category);
    }

    insert_in_batches(ctx, step, &kb.categories).await?;
    insert_in_batches(ctx, step, &kb.articles).await?;
    Ok(kb)
}
