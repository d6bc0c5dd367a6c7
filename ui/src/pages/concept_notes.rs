//! Concept notes page

use crate::api::{self, ApiResult};
use crate::components::remote_view;
use crate::state::AppState;
use crate::types::ConceptNote;
use leptos::prelude::*;

#[component]
pub fn ConceptNotesPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let notes = RwSignal::new(None::<ApiResult<Vec<ConceptNote>>>);

    api::load_into(&state, notes, |base, token| async move {
        api::fetch_concept_notes(&base, &token).await
    });

    view! {
        <section class="page">
            <h2 class="page-title">"Concept Notes"</h2>
            {move || remote_view(notes.get(), |notes| {
                if notes.is_empty() {
                    return view! { <p class="text-muted">"No concept notes yet"</p> }.into_any();
                }
                notes
                    .into_iter()
                    .map(|n| view! {
                        <article class="card note">
                            <h3 class="note-title">{n.title}</h3>
                            <p class="note-body">{n.body}</p>
                        </article>
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            })}
        </section>
    }
}
