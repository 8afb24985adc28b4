use anyhow::Result;
use chrono::NaiveDate;

use crate::compose::{ComposeInput, Composer};
use crate::intent::{ExtractedIntent, Extractor, GENERAL_INQUIRY};
use crate::session::DialogContext;
use crate::weather::{UNDEFINED_CITY, WeatherSource};

use super::gateway::GenerationGateway;
use super::types::{CHECK_CITY_REPLY, MISUNDERSTOOD_REPLY, TurnOutcome, TurnReply, TurnStage};

const DEFAULT_TONE: &str = "neutral";
const DEFAULT_REQUIREMENT: &str = "weather conditions";
/// Provider keyword, resolved in the city's own time zone.
const DEFAULT_DATE: &str = "today";

pub struct EngineDeps<'a> {
    pub gateway: &'a dyn GenerationGateway,
    pub weather: &'a dyn WeatherSource,
    pub extractor: &'a Extractor,
    pub composer: &'a Composer,
}

/// What the rest of the turn needs once the intent is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    pub tone: String,
    pub requirement: String,
    /// Restated question for non-weather turns.
    pub question: Option<String>,
    pub phenomenon: Option<String>,
    pub lookup: Option<LookupTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTarget {
    pub city: String,
    pub date: String,
}

/// Fills the gaps of an intent from the dialog context. Non-weather
/// questions and small talk need no lookup.
pub fn plan_turn(intent: &ExtractedIntent, context: &DialogContext) -> TurnPlan {
    let weather = match intent {
        ExtractedIntent::Other { message } => {
            return TurnPlan {
                tone: DEFAULT_TONE.to_string(),
                requirement: GENERAL_INQUIRY.to_string(),
                question: Some(message.clone()),
                phenomenon: None,
                lookup: None,
            };
        }
        ExtractedIntent::Weather(weather) => weather,
    };

    let tone = weather.tone.clone().unwrap_or_else(|| DEFAULT_TONE.to_string());
    let requirement = weather
        .requirement
        .clone()
        .or_else(|| context.last_requirement.clone())
        .unwrap_or_else(|| DEFAULT_REQUIREMENT.to_string());
    let phenomenon = weather.phenomenon.clone();
    if requirement.eq_ignore_ascii_case(GENERAL_INQUIRY) {
        return TurnPlan {
            tone,
            requirement,
            question: None,
            phenomenon,
            lookup: None,
        };
    }

    let city = weather
        .city
        .clone()
        .or_else(|| context.last_city.clone())
        .unwrap_or_else(|| UNDEFINED_CITY.to_string());
    let date = weather
        .date
        .clone()
        .unwrap_or_else(|| DEFAULT_DATE.to_string());
    TurnPlan {
        tone,
        requirement,
        question: None,
        phenomenon,
        lookup: Some(LookupTarget { city, date }),
    }
}

pub async fn run(
    deps: EngineDeps<'_>,
    user_input: &str,
    context: &mut DialogContext,
    today: NaiveDate,
) -> Result<TurnReply> {
    enter(TurnStage::Start);
    let Some(intent) = deps
        .extractor
        .extract(deps.gateway, user_input, context, today)
        .await?
    else {
        return Ok(TurnReply::new(
            MISUNDERSTOOD_REPLY,
            TurnOutcome::Misunderstood,
            TurnStage::Start,
        ));
    };
    enter(TurnStage::Extracted);

    let plan = plan_turn(&intent, context);
    let weather = match &plan.lookup {
        Some(target) => match deps.weather.lookup(&target.city, &target.date).await {
            Ok(data) => {
                tracing::debug!(
                    city = %target.city,
                    date = %target.date,
                    resolved = data.resolved_address().unwrap_or("?"),
                    "weather lookup succeeded"
                );
                Some(data)
            }
            Err(err) => {
                tracing::warn!(
                    city = %target.city,
                    date = %target.date,
                    kind = err.kind(),
                    error = %err,
                    "weather lookup failed"
                );
                return Ok(TurnReply::new(
                    CHECK_CITY_REPLY,
                    TurnOutcome::LookupFailed,
                    TurnStage::Extracted,
                ));
            }
        },
        None => None,
    };
    enter(TurnStage::LookedUp);

    let reply = deps
        .composer
        .compose(
            deps.gateway,
            &ComposeInput {
                user_input: plan.question.as_deref().unwrap_or(user_input),
                tone: &plan.tone,
                requirement: &plan.requirement,
                weather: weather.as_ref(),
                context: &*context,
                phenomenon: plan.phenomenon.as_deref(),
            },
        )
        .await?;
    enter(TurnStage::Composed);
    enter(TurnStage::Done);

    Ok(TurnReply::new(reply, TurnOutcome::Composed, TurnStage::Done))
}

fn enter(stage: TurnStage) {
    tracing::debug!(%stage, "turn stage");
}
