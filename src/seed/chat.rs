use crate::model::{
    generate_id, ChatGroup, ChatGroupMember, ChatMessage, MemberRole, Project, UserProfile,
};
use crate::seed::batch::{insert_in_batches, refetch};
use crate::seed::context::SeedContext;
use crate::seed::data::{CHAT_LINES, CHAT_TOPICS};
use crate::seed::error::SeedError;
use crate::seed::generate::{count_up_to, minutes_before, pick, word};
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Extra members per group besides the creator.
const MAX_EXTRA_MEMBERS: usize = 4;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeededChatGroups {
    pub groups: Vec<ChatGroup>,
    pub members: Vec<ChatGroupMember>,
}

/// Chat groups created by random users, optionally tied to a project. The
/// creator is always an admin member; a few other users join as members.
pub async fn seed_chat_groups<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    count: usize,
    projects: &[Project],
    users: &[UserProfile],
) -> Result<SeededChatGroups, SeedError> {
    let step = SeedStep::ChatGroups;
    if users.is_empty() {
        ctx.skip(step, "users");
        return Ok(SeededChatGroups::default());
    }
    if projects.is_empty() {
        ctx.warn(step, "No projects available; groups will not be linked to projects");
    }

    let now = ctx.now();
    let mut seeded = SeededChatGroups::default();
    for _ in 0..count {
        let rng = ctx.rng();
        let Some(creator) = pick(rng, users) else {
            break;
        };
        let project = if rng.gen_bool(0.7) {
            pick(rng, projects)
        } else {
            None
        };
        let topic = word(rng, CHAT_TOPICS);
        let name = match project {
            Some(project) => format!("{} - {}", project.name, topic),
            None => topic.to_string(),
        };
        // Leave room for a week of conversation after creation.
        let created_at = minutes_before(rng, now - Duration::days(7), 60 * 24 * 21);

        let group = ChatGroup {
            id: generate_id(),
            description: Some(format!("{} discussion", name)),
            name,
            project_id: project.map(|project| project.id.clone()),
            created_by: creator.id.clone(),
            created_at,
        };

        seeded.members.push(ChatGroupMember {
            id: generate_id(),
            group_id: group.id.clone(),
            user_id: creator.id.clone(),
            role: MemberRole::Admin,
            joined_at: created_at,
        });
        let others: Vec<&UserProfile> = users.iter().filter(|user| user.id != creator.id).collect();
        let extra = rng.gen_range(0..=MAX_EXTRA_MEMBERS.min(others.len()));
        for user in others.choose_multiple(rng, extra) {
            seeded.members.push(ChatGroupMember {
                id: generate_id(),
                group_id: group.id.clone(),
                user_id: user.id.clone(),
                role: MemberRole::Member,
                joined_at: created_at + Duration::minutes(rng.gen_range(1..=120)),
            });
        }
        seeded.groups.push(group);
    }

    insert_in_batches(ctx, step, &seeded.groups).await?;
    seeded.groups = refetch(ctx, &seeded.groups).await?;
    insert_in_batches(ctx, step, &seeded.members).await?;
    Ok(seeded)
}

/// Between 1 and `max_per_group` messages per group, strictly increasing in
/// time and all after the group was created. Senders are members of the
/// group who had joined by the time of the message.
pub async fn seed_chat_messages<B: Backend + ?Sized>(
    ctx: &mut SeedContext<'_, B>,
    max_per_group: usize,
    chat_groups: &SeededChatGroups,
) -> Result<Vec<ChatMessage>, SeedError> {
    let step = SeedStep::ChatMessages;
    if chat_groups.groups.is_empty() {
        ctx.skip(step, "chat groups");
        return Ok(Vec::new());
    }
    if chat_groups.members.is_empty() {
        ctx.skip(step, "chat group members");
        return Ok(Vec::new());
    }

    let mut messages = Vec::new();
    for group in &chat_groups.groups {
        let members: Vec<&ChatGroupMember> = chat_groups
            .members
            .iter()
            .filter(|member| member.group_id == group.id)
            .collect();
        let rng = ctx.rng();
        let mut at = group.created_at;
        for _ in 0..count_up_to(rng, max_per_group) {
            at += Duration::minutes(rng.gen_range(1..=180));
            let present: Vec<&ChatGroupMember> = members
                .iter()
                .copied()
                .filter(|member| member.joined_at <= at)
                .collect();
            let Some(sender) = pick(rng, &present) else {
                continue;
            };
            messages.push(ChatMessage {
                id: generate_id(),
                group_id: group.id.clone(),
                sender_id: sender.user_id.clone(),
                content: word(rng, CHAT_LINES).to_string(),
                created_at: at,
            });
        }
    }

    insert_in_batches(ctx, step, &messages).await?;
    Ok(messages)
}
