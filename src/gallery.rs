//! Category filter and "load more" pager for the activity gallery.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => Self::All,
            category => Self::Category(category.to_string()),
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => category == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct GalleryLayout {
    pub visible: Vec<bool>,
    pub show_load_more: bool,
}

impl GalleryLayout {
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|shown| **shown).count()
    }
}

/// Shows at most `limit` items matching the active filter. Picking a filter
/// goes back to a single page; "load more" adds one page at a time until
/// every match is on screen.
#[derive(Debug)]
pub struct GalleryPager {
    categories: Vec<Option<String>>,
    page_size: usize,
    limit: usize,
    filter: Filter,
}

impl GalleryPager {
    pub fn new(categories: Vec<Option<String>>, page_size: usize, filter: Filter) -> Self {
        let page_size = page_size.max(1);
        Self {
            categories,
            page_size,
            limit: page_size,
            filter,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    fn matching_count(&self) -> usize {
        self.categories
            .iter()
            .filter(|category| self.filter.matches(category.as_deref()))
            .count()
    }

    pub fn has_more(&self) -> bool {
        self.limit < self.matching_count()
    }

    pub fn select(&mut self, filter: Filter) -> GalleryLayout {
        self.filter = filter;
        self.limit = self.page_size;
        self.layout()
    }

    pub fn load_more(&mut self) -> GalleryLayout {
        if self.has_more() {
            self.limit += self.page_size;
        }
        self.layout()
    }

    pub fn layout(&self) -> GalleryLayout {
        let mut shown = 0;
        let visible = self
            .categories
            .iter()
            .map(|category| {
                let show = self.filter.matches(category.as_deref()) && shown < self.limit;
                if show {
                    shown += 1;
                }
                show
            })
            .collect();

        GalleryLayout {
            visible,
            show_load_more: self.has_more(),
        }
    }
}

pub fn fade_in_animation(index: usize) -> String {
    let delay = index as f64 * 0.1;
    format!("fadeInCard 0.6s {delay:.1}s ease-out forwards")
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, HtmlElement, MouseEvent};

    struct Gallery {
        items: Vec<HtmlElement>,
        buttons: Vec<HtmlElement>,
        load_more: Option<HtmlElement>,
        pager: RefCell<GalleryPager>,
    }

    impl Gallery {
        fn render(&self, layout: &GalleryLayout, animate: bool) {
            for (index, (item, shown)) in self.items.iter().zip(&layout.visible).enumerate() {
                if *shown {
                    dom::set_style(item, "display", "block");
                    if animate {
                        dom::set_style(item, "animation", &fade_in_animation(index));
                    }
                } else {
                    dom::set_style(item, "display", "none");
                }
            }

            if let Some(button) = &self.load_more {
                let display = if layout.show_load_more { "inline-block" } else { "none" };
                dom::set_style(button, "display", display);
            }
        }

        fn activate(&self, chosen: &HtmlElement) {
            for button in &self.buttons {
                let _ = button.class_list().remove_1("active");
            }
            let _ = chosen.class_list().add_1("active");
        }
    }

    pub fn attach(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
        let buttons: Vec<HtmlElement> = dom::query_all(document, ".filter-btn[data-filter]");
        if buttons.is_empty() {
            return Ok(());
        }

        let items: Vec<HtmlElement> = dom::query_all(document, ".gallery-item");
        let categories = items
            .iter()
            .map(|item| item.get_attribute("data-category"))
            .collect();
        let initial_filter = buttons
            .iter()
            .find(|button| button.class_list().contains("active"))
            .and_then(|button| button.get_attribute("data-filter"))
            .map(|value| Filter::parse(&value))
            .unwrap_or(Filter::All);

        let gallery = Rc::new(Gallery {
            items,
            buttons: buttons.clone(),
            load_more: dom::query(document, ".load-more-btn"),
            pager: RefCell::new(GalleryPager::new(
                categories,
                config.gallery_page_size,
                initial_filter,
            )),
        });
        gallery.render(&gallery.pager.borrow().layout(), false);

        for button in &buttons {
            let gallery = gallery.clone();
            let chosen = button.clone();
            dom::listen(button, "click", move |_event: MouseEvent| {
                gallery.activate(&chosen);
                let value = chosen.get_attribute("data-filter").unwrap_or_default();
                let filter = Filter::parse(&value);
                let layout = gallery.pager.borrow_mut().select(filter);
                gallery.render(&layout, true);
            })?;
        }

        if let Some(load_more) = gallery.load_more.clone() {
            let gallery = gallery.clone();
            dom::listen(&load_more, "click", move |_event: MouseEvent| {
                let layout = gallery.pager.borrow_mut().load_more();
                gallery.render(&layout, true);
            })?;
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::attach;

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(pattern: &[&str]) -> Vec<Option<String>> {
        pattern.iter().map(|value| Some(value.to_string())).collect()
    }

    fn sample_pager(page_size: usize) -> GalleryPager {
        // 7 "seminar", 5 "bakti", 2 uncategorised
        let mut items = categories(&[
            "seminar", "bakti", "seminar", "seminar", "bakti", "seminar", "bakti", "seminar",
            "bakti", "seminar", "bakti", "seminar",
        ]);
        items.push(None);
        items.push(None);
        GalleryPager::new(items, page_size, Filter::All)
    }

    fn visible_categories<'a>(
        pager: &'a GalleryPager,
        layout: &GalleryLayout,
    ) -> Vec<Option<&'a str>> {
        pager
            .categories
            .iter()
            .zip(&layout.visible)
            .filter(|(_, shown)| **shown)
            .map(|(category, _)| category.as_deref())
            .collect()
    }

    #[test]
    fn initial_layout_shows_first_page_of_everything() {
        let pager = sample_pager(9);
        let layout = pager.layout();
        assert_eq!(layout.visible_count(), 9);
        assert!(layout.visible[..9].iter().all(|shown| *shown));
        assert!(layout.show_load_more);
    }

    #[test]
    fn filtered_items_all_match_and_respect_limit() {
        let mut pager = sample_pager(3);
        for filter in ["seminar", "bakti", "all", "unknown"] {
            let layout = pager.select(Filter::parse(filter));
            assert!(layout.visible_count() <= pager.limit());
            for category in visible_categories(&pager, &layout) {
                assert!(pager.filter().matches(category));
            }
        }
    }

    #[test]
    fn load_more_grows_by_one_page_until_exhausted() {
        let mut pager = sample_pager(2);
        pager.select(Filter::parse("bakti"));

        let mut limits = vec![pager.limit()];
        let mut layout = pager.layout();
        while layout.show_load_more {
            layout = pager.load_more();
            limits.push(pager.limit());
        }

        assert_eq!(limits, vec![2, 4, 6]);
        assert_eq!(layout.visible_count(), 5);
        assert!(!layout.show_load_more);

        // once exhausted the pager stays put
        let again = pager.load_more();
        assert_eq!(pager.limit(), 6);
        assert_eq!(again.visible_count(), 5);
    }

    #[test]
    fn choosing_a_filter_resets_to_one_page() {
        let mut pager = sample_pager(2);
        pager.load_more();
        pager.load_more();
        assert_eq!(pager.limit(), 6);

        let layout = pager.select(Filter::parse("seminar"));
        assert_eq!(pager.limit(), 2);
        assert_eq!(layout.visible_count(), 2);
    }

    #[test]
    fn unknown_category_hides_everything_and_the_button() {
        let mut pager = sample_pager(9);
        let layout = pager.select(Filter::Category("lomba".to_string()));
        assert_eq!(layout.visible_count(), 0);
        assert!(!layout.show_load_more);
    }

    #[test]
    fn uncategorised_items_only_show_under_all() {
        assert!(Filter::All.matches(None));
        assert!(!Filter::parse("seminar").matches(None));
        assert_eq!(Filter::parse(" all "), Filter::All);
    }

    #[test]
    fn card_fade_is_staggered_by_position() {
        assert_eq!(fade_in_animation(3), "fadeInCard 0.6s 0.3s ease-out forwards");
    }
}
