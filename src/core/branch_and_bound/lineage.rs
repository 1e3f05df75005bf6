use crate::{core::hour::Hour, quantity::cost::Cost};

/// Handle of a [`Link`] within its [`Lineage`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct LinkId(usize);

/// Lightweight trace of a vertex that outlives the vertex itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// [`None`] for the first device.
    pub parent: Option<LinkId>,

    /// Position of the device in the search order.
    pub depth: usize,

    pub start_hour: Hour,
    pub incremental_cost: Cost,
}

/// Arena of the ancestor chains of the live frontier.
///
/// Parents are always stored before their children.
#[derive(Debug, Default)]
pub struct Lineage {
    links: Vec<Link>,
}

impl Lineage {
    pub fn push(&mut self, link: Link) -> LinkId {
        debug_assert!(link.parent.is_none_or(|parent| parent.0 < self.links.len()));
        self.links.push(link);
        LinkId(self.links.len() - 1)
    }

    pub fn get(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Walk from the specified link up to the first device.
    pub fn ancestry(&self, head: Option<LinkId>) -> impl Iterator<Item = &Link> {
        std::iter::successors(head.map(|id| self.get(id)), |link| {
            link.parent.map(|parent| self.get(parent))
        })
    }

    /// Drop every link that none of the heads descends from, and re-point the heads.
    ///
    /// Relative order is preserved, so parents still precede their children.
    pub fn retain_reachable<'h>(&mut self, heads: impl IntoIterator<Item = &'h mut Option<LinkId>>) {
        let mut heads = heads.into_iter().collect::<Vec<_>>();

        let mut is_reachable = vec![false; self.links.len()];
        for head in &heads {
            let mut cursor = **head;
            while let Some(id) = cursor {
                if is_reachable[id.0] {
                    break;
                }
                is_reachable[id.0] = true;
                cursor = self.links[id.0].parent;
            }
        }

        let mut new_indices = vec![0; self.links.len()];
        let mut retained = Vec::with_capacity(is_reachable.iter().filter(|it| **it).count());
        for (index, link) in std::mem::take(&mut self.links).into_iter().enumerate() {
            if is_reachable[index] {
                new_indices[index] = retained.len();
                retained.push(Link {
                    parent: link.parent.map(|parent| LinkId(new_indices[parent.0])),
                    ..link
                });
            }
        }
        self.links = retained;

        for head in &mut heads {
            **head = head.map(|id| LinkId(new_indices[id.0]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(parent: Option<LinkId>, depth: usize, start_hour: u8) -> Link {
        Link {
            parent,
            depth,
            start_hour: Hour::try_from(start_hour).unwrap(),
            incremental_cost: Cost::ZERO,
        }
    }

    fn start_hours<'a>(links: impl Iterator<Item = &'a Link>) -> Vec<u8> {
        links.map(|link| u8::from(link.start_hour)).collect()
    }

    #[test]
    fn test_ancestry() {
        let mut lineage = Lineage::default();
        let root = lineage.push(link(None, 0, 1));
        let child = lineage.push(link(Some(root), 1, 2));
        let grandchild = lineage.push(link(Some(child), 2, 3));
        assert_eq!(start_hours(lineage.ancestry(Some(grandchild))), [3, 2, 1]);
        assert!(lineage.ancestry(None).next().is_none());
    }

    #[test]
    fn test_retain_reachable() {
        let mut lineage = Lineage::default();
        let dead_end = lineage.push(link(None, 0, 1));
        let survivor = lineage.push(link(None, 0, 2));
        let _orphan = lineage.push(link(Some(dead_end), 1, 3));
        let left = lineage.push(link(Some(survivor), 1, 4));
        let right = lineage.push(link(Some(survivor), 1, 5));

        let mut heads = [Some(right), Some(left)];
        lineage.retain_reachable(heads.iter_mut());

        assert_eq!(lineage.len(), 3);
        assert_eq!(start_hours(lineage.ancestry(heads[0])), [5, 2]);
        assert_eq!(start_hours(lineage.ancestry(heads[1])), [4, 2]);
    }

    #[test]
    fn test_retain_reachable_root_head() {
        let mut lineage = Lineage::default();
        lineage.push(link(None, 0, 1));
        let mut heads = [None];
        lineage.retain_reachable(heads.iter_mut());
        assert_eq!(lineage.len(), 0);
        assert_eq!(heads, [None]);
    }
}
