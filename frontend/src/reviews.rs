use chrono::{Local, TimeZone, Utc};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config;

const MAX_REVIEWS: usize = 6;
const DAY: i64 = 86_400;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Review {
    pub author_name: String,
    pub text: String,
    pub time: i64,
    #[serde(default)]
    pub rating: Option<u8>,
}

#[derive(Deserialize)]
struct PlaceDetails {
    result: Option<PlaceResult>,
}

#[derive(Deserialize)]
struct PlaceResult {
    reviews: Option<Vec<Review>>,
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// "Mar 2025" style date, in the visitor's local time, for a unix timestamp in seconds.
pub fn review_date(time: i64) -> String {
    Local.timestamp_opt(time, 0)
        .single()
        .map(|dt| dt.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Five-star reviews only, newest first as Google returns them, capped.
pub fn five_star(reviews: Vec<Review>) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|r| r.rating == Some(5))
        .take(MAX_REVIEWS)
        .collect()
}

/// Shown when Google Places is not configured or cannot be reached.
pub fn demo_reviews(now: i64) -> Vec<Review> {
    let demo = |author: &str, text: &str, days_ago: i64| Review {
        author_name: author.to_string(),
        text: text.to_string(),
        time: now - DAY * days_ago,
        rating: Some(5),
    };
    vec![
        demo("Sarah Johnson", "IFLA has completely transformed my language learning experience! The interactive lessons and personalized approach made learning Japanese enjoyable and effective. Highly recommend!", 30),
        demo("Michael Chen", "Best language learning platform I've used! The teachers are amazing and the curriculum is well-structured. I went from beginner to conversational in just 6 months.", 45),
        demo("Emma Rodriguez", "Excellent program! The cultural immersion aspects really set IFLA apart. I not only learned the language but also gained deep insights into the culture.", 60),
        demo("David Kim", "Outstanding quality and value. The flexibility to learn at my own pace while having expert guidance made all the difference. Worth every penny!", 15),
        demo("Lisa Thompson", "IFLA exceeded all my expectations! The interactive platform, supportive community, and knowledgeable instructors created the perfect learning environment.", 20),
        demo("James Wilson", "Incredible experience! The personalized learning path and real-time feedback helped me achieve fluency faster than I ever thought possible.", 10),
    ]
}

async fn fetch_google_reviews() -> Result<Option<Vec<Review>>, gloo_net::Error> {
    let url = format!(
        "https://maps.googleapis.com/maps/api/place/details/json?place_id={}&fields=reviews,rating,user_ratings_total&key={}",
        urlencoding::encode(config::GOOGLE_PLACE_ID),
        urlencoding::encode(config::GOOGLE_PLACES_API_KEY),
    );
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "Failed to fetch reviews: status {}",
            response.status()
        )));
    }
    let details: PlaceDetails = response.json().await?;
    Ok(details.result.and_then(|r| r.reviews))
}

/// Google reviews when available, demo reviews otherwise. Never fails.
pub async fn load_reviews() -> Vec<Review> {
    let now = Utc::now().timestamp();
    if !config::google_places_configured() {
        return demo_reviews(now);
    }
    match fetch_google_reviews().await {
        Ok(Some(reviews)) => five_star(reviews),
        Ok(None) => demo_reviews(now),
        Err(e) => {
            log::error!("Error fetching Google reviews: {}", e);
            demo_reviews(now)
        }
    }
}

#[function_component]
pub fn ReviewsGrid() -> Html {
    let reviews = use_state(|| None::<Vec<Review>>);

    {
        let reviews = reviews.clone();
        use_effect_with_deps(
            move |_| {
                // Let the rest of the page settle first.
                let timeout = Timeout::new(config::REVIEWS_FETCH_DELAY, move || {
                    spawn_local(async move {
                        reviews.set(Some(load_reviews().await));
                    });
                });
                move || drop(timeout)
            },
            (),
        );
    }

    html! {
        <div class="reviews-grid" id="reviewsGrid">
            {
                match &*reviews {
                    None => html! { <div class="reviews-loading">{"Loading reviews..."}</div> },
                    Some(list) => list.iter().enumerate().map(|(index, review)| html! {
                        <ReviewCard review={review.clone()} index={index} />
                    }).collect::<Html>(),
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ReviewCardProps {
    review: Review,
    index: usize,
}

#[function_component]
fn ReviewCard(props: &ReviewCardProps) -> Html {
    let review = &props.review;
    let stars = "⭐".repeat(5);
    html! {
        <div class="review-card" style={format!("animation-delay: {:.1}s", props.index as f64 * 0.1)}>
            <div class="review-header">
                <div class="review-avatar">{initials(&review.author_name)}</div>
                <div class="review-info">
                    <div class="review-name">{&review.author_name}</div>
                    <div class="review-date">{review_date(review.time)}</div>
                </div>
            </div>
            <div class="review-stars">{stars}</div>
            <p class="review-text">{&review.text}</p>
            <div class="review-google-badge">
                <span>{"Posted on Google"}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(name: &str, rating: Option<u8>) -> Review {
        Review { author_name: name.into(), text: "t".into(), time: 0, rating }
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("emma maria rodriguez"), "EM");
        assert_eq!(initials("  Cher "), "C");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn dates_render_month_and_year() {
        // Mid-month instants, so every UTC offset lands in the same month.
        assert_eq!(review_date(1_000_000), "Jan 1970");
        assert_eq!(review_date(1_700_000_000), "Nov 2023");
    }

    #[test]
    fn only_five_star_reviews_are_kept() {
        let mixed = vec![review("a", Some(5)), review("b", Some(4)), review("c", None), review("d", Some(5))];
        let kept: Vec<_> = five_star(mixed).into_iter().map(|r| r.author_name).collect();
        assert_eq!(kept, ["a", "d"]);
    }

    #[test]
    fn at_most_six_reviews() {
        let many = (0..10).map(|i| review(&i.to_string(), Some(5))).collect();
        assert_eq!(five_star(many).len(), MAX_REVIEWS);
    }

    #[test]
    fn demo_set_is_complete_and_in_the_past() {
        let now = 1_700_000_000;
        let demo = demo_reviews(now);
        assert_eq!(demo.len(), 6);
        assert!(demo.iter().all(|r| r.time < now && r.rating == Some(5)));
        assert_eq!(demo[3].time, now - 15 * DAY);
    }

    #[test]
    fn place_details_parse() {
        let body = serde_json::json!({
            "result": {"reviews": [{"author_name": "X Y", "text": "great", "time": 1, "rating": 5}]}
        });
        let parsed: PlaceDetails = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.result.unwrap().reviews.unwrap()[0].author_name, "X Y");
    }
}
