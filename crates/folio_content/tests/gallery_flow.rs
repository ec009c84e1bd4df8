//! Integration test for the gallery: swipe to a project, tap it, follow the
//! route, and reveal the detail page from the tapped card.

use folio_carousel::{Carousel, CarouselConfig};
use folio_content::{
    CaseStudyView, Catalog, ContentError, DetailReveal, DetailRoute, RevealTimings, SectionKind,
};
use folio_core::{ManualClock, Rect};

#[test]
fn test_swipe_tap_and_reveal() {
    let clock = ManualClock::shared(0.0);
    let catalog = Catalog::builtin();
    let mut carousel = Carousel::with_clock(
        catalog.projects().to_vec(),
        CarouselConfig::default(),
        clock.clone(),
    )
    .unwrap();

    carousel.begin_drag(640.0);
    carousel.update_drag(420.0);
    assert!(carousel.end_drag().is_committed());
    assert_eq!(carousel.selected_item().slug, "project-2");

    let card = Rect::new(225.0, 390.0, 500.0, 350.0);
    assert!(carousel.tap(0, card).is_none(), "side cards are not clickable");
    let navigate = carousel.tap(1, card).expect("center card navigates");

    let path = DetailRoute::from_navigate(&navigate).to_path();
    assert!(path.starts_with("/work/2?rect="));

    let route = DetailRoute::parse(&path).unwrap();
    let project = catalog.find(&route.project).unwrap();
    assert_eq!(project.title, "Project Two");

    let viewport = Rect::viewport(1280.0, 800.0);
    let mut reveal = DetailReveal::start(route.origin, viewport, RevealTimings::default(), 0.0);
    assert_eq!(reveal.frame(0.0).image_rect, card);

    reveal.advance(2800.0);
    let frame = reveal.frame(2800.0);
    assert_eq!(frame.image_rect, viewport);
    assert!(frame.content_visible);
}

#[test]
fn test_unknown_project_route() {
    let catalog = Catalog::builtin();
    let route = DetailRoute::parse("/work/99").unwrap();
    assert_eq!(
        catalog.find(&route.project),
        Err(ContentError::ProjectNotFound("99".to_string()))
    );
}

#[test]
fn test_case_study_route_opens_on_problem() {
    let catalog = Catalog::builtin();
    let route = DetailRoute::parse("/work/project-1#top").unwrap();
    let project = catalog.find(&route.project).unwrap();
    assert_eq!(project.id, 1);

    let study = project.case_study.as_ref().unwrap();
    let mut view = CaseStudyView::new(study).unwrap();
    assert_eq!(view.active(), SectionKind::Problem);

    assert!(view.select(SectionKind::Results));
    assert_eq!(view.active_section().kind, SectionKind::Results);
    assert_eq!(view.tabs().iter().filter(|tab| tab.active).count(), 1);
}
