//! Page host
//!
//! Builds the document, wraps every content section in a [`FadeIn`], and
//! drives frames: compositor update, callback flush, then a re-paint of
//! whatever the controllers scheduled.

use std::collections::HashMap;
use std::rc::Rc;

use fos_dom::{DOMRect, Document, NodeId};
use fos_reveal::{Compositor, FadeIn, ObservationPlatform, RenderQueue, VisibilityObserverController};

use crate::{AnalyticsTag, Footer, Section, SiteConfig, SiteError};

/// Frame interval used for record timestamps
const FRAME_MS: f64 = 16.0;

struct RevealedSection {
    wrapper: NodeId,
    rect: DOMRect,
    reveal: FadeIn<Box<dyn Section>>,
}

/// A rendered portfolio page with live reveal controllers
pub struct PortfolioPage {
    document: Document,
    compositor: Rc<Compositor>,
    queue: RenderQueue,
    sections: Vec<RevealedSection>,
    viewport: DOMRect,
    frame: u64,
}

impl PortfolioPage {
    pub fn new(config: &SiteConfig, sections: Vec<Box<dyn Section>>) -> Result<Self, SiteError> {
        config.validate()?;

        let mut document = Document::new(&config.title)?;
        if let Some(id) = &config.analytics_id {
            let head = document.head();
            AnalyticsTag::new(id)?.inject(document.tree_mut(), head)?;
        }

        let compositor = Rc::new(Compositor::new());
        let queue = RenderQueue::new();
        let body = document.body();
        let mut revealed = Vec::with_capacity(sections.len());

        for (index, section) in sections.into_iter().enumerate() {
            let tree = document.tree_mut();
            let wrapper = tree.append_element(body, "div")?;
            tree.set_attribute(wrapper, "id", section.id())?;
            tree.set_attribute(wrapper, "class", "fade-in-section")?;
            section.render(tree, wrapper)?;

            let controller = VisibilityObserverController::new(config.reveal.clone(), compositor.clone())
                .with_render_queue(queue.clone());
            let mut reveal = FadeIn::new(section, controller);
            reveal.mount(tree, wrapper)?;

            let rect = DOMRect::from_xywh(
                0.0,
                index as f64 * config.section_height,
                config.viewport.width,
                config.section_height,
            );
            revealed.push(RevealedSection { wrapper, rect, reveal });
        }

        Footer::new(&config.owner, config.year, &config.logo).render(document.tree_mut(), body)?;

        tracing::info!(sections = revealed.len(), "page built");
        Ok(Self {
            document,
            compositor,
            queue,
            sections: revealed,
            viewport: DOMRect::from_xywh(0.0, 0.0, config.viewport.width, config.viewport.height),
            frame: 0,
        })
    }

    /// The default page: skills followed by publications
    pub fn portfolio(config: &SiteConfig, publications: crate::CitationsSection) -> Result<Self, SiteError> {
        let sections: Vec<Box<dyn Section>> = vec![
            Box::new(crate::SkillsSection::portfolio()),
            Box::new(publications),
        ];
        Self::new(config, sections)
    }

    /// Run one frame with the viewport scrolled to `offset`. Returns the
    /// number of sections re-painted.
    pub fn scroll_to(&mut self, offset: f64) -> Result<usize, SiteError> {
        self.viewport.y = offset.max(0.0);
        let time = self.frame as f64 * FRAME_MS;
        self.frame += 1;

        let rects: HashMap<NodeId, DOMRect> = self
            .sections
            .iter()
            .filter(|s| s.reveal.controller().is_mounted())
            .map(|s| (s.wrapper, s.rect))
            .collect();
        self.compositor.update(self.viewport, &rects, time);
        self.compositor.flush();

        let mut painted = 0;
        for node in self.queue.drain() {
            let Some(section) = self.sections.iter().find(|s| s.wrapper == node) else {
                continue;
            };
            section.reveal.paint(self.document.tree_mut(), node)?;
            painted += 1;
        }
        tracing::debug!(offset = self.viewport.y, painted, "frame");
        Ok(painted)
    }

    /// Release every observation resource. Section styles stay as last painted.
    pub fn unmount_all(&mut self) -> usize {
        let released = self
            .sections
            .iter_mut()
            .map(|s| s.reveal.unmount())
            .filter(|&released| released)
            .count();
        tracing::debug!(released, "sections unmounted");
        released
    }

    /// Ids of sections whose controller currently reports visible
    pub fn visible_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.reveal.controller().is_visible())
            .map(|s| s.reveal.content().id())
            .collect()
    }

    /// The `style` attribute currently painted on a section wrapper
    pub fn section_style(&self, id: &str) -> Option<&str> {
        let section = self.sections.iter().find(|s| s.reveal.content().id() == id)?;
        self.document.tree().attribute(section.wrapper, "style")
    }

    pub fn active_observers(&self) -> usize {
        self.compositor.active_count()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}
