use std::cmp::Ordering;
use std::collections::HashMap;

use super::value_objects::Rect;
use crate::domain::errors::{AppError, LayoutResult};

/// One node of a [`Hierarchy`], stored in an arena.
#[derive(Debug, Clone)]
pub struct HierarchyNode<T> {
    pub data: T,
    pub id: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
    /// Aggregated weight, set by [`Hierarchy::sum`]
    pub value: f64,
    /// Position, set by the layout
    pub rect: Rect,
}

/// Tree built from flat records that reference their parent by id.
#[derive(Debug, Clone)]
pub struct Hierarchy<T> {
    nodes: Vec<HierarchyNode<T>>,
    root: usize,
}

impl<T> Hierarchy<T> {
    /// Build the tree from `id` / `parent_id` accessors.
    ///
    /// Exactly one record must have an empty parent id; every other parent id
    /// must name an existing record, and ids must be unique.
    pub fn stratify<I, P>(data: Vec<T>, id: I, parent_id: P) -> LayoutResult<Self>
    where
        I: Fn(&T) -> String,
        P: Fn(&T) -> String,
    {
        let mut index_by_id: HashMap<String, usize> = HashMap::with_capacity(data.len());
        let mut parent_ids = Vec::with_capacity(data.len());
        let mut nodes = Vec::with_capacity(data.len());

        for (index, item) in data.into_iter().enumerate() {
            let node_id = id(&item);
            if index_by_id.insert(node_id.clone(), index).is_some() {
                return Err(AppError::Layout(format!("duplicate: {node_id}")));
            }
            parent_ids.push(parent_id(&item));
            nodes.push(HierarchyNode {
                data: item,
                id: node_id,
                parent: None,
                children: Vec::new(),
                depth: 0,
                value: 0.0,
                rect: Rect::default(),
            });
        }

        let mut root = None;
        for (index, parent) in parent_ids.iter().enumerate() {
            if parent.is_empty() {
                if root.replace(index).is_some() {
                    return Err(AppError::Layout("multiple roots".to_string()));
                }
                continue;
            }
            let Some(&parent_index) = index_by_id.get(parent) else {
                return Err(AppError::Layout(format!("missing: {parent}")));
            };
            nodes[index].parent = Some(parent_index);
            nodes[parent_index].children.push(index);
        }
        let root = root.ok_or_else(|| AppError::Layout("no root".to_string()))?;

        let mut hierarchy = Self { nodes, root };
        let reached = hierarchy.assign_depths();
        if reached != hierarchy.nodes.len() {
            return Err(AppError::Layout("cycle".to_string()));
        }
        Ok(hierarchy)
    }

    fn assign_depths(&mut self) -> usize {
        let mut stack = vec![(self.root, 0usize)];
        let mut reached = 0;
        while let Some((index, depth)) = stack.pop() {
            reached += 1;
            self.nodes[index].depth = depth;
            stack.extend(self.nodes[index].children.iter().map(|&child| (child, depth + 1)));
        }
        reached
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, index: usize) -> &HierarchyNode<T> {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut HierarchyNode<T> {
        &mut self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node indices in pre-order, children in their current order.
    pub fn pre_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        order
    }

    /// Set every node's value to its own weight plus its descendants'.
    pub fn sum<F>(&mut self, weight: F) -> &mut Self
    where
        F: Fn(&T) -> f64,
    {
        for index in self.pre_order().into_iter().rev() {
            let own = weight(&self.nodes[index].data);
            let own = if own.is_finite() { own } else { 0.0 };
            let children: f64 = self.nodes[index].children.iter().map(|&c| self.nodes[c].value).sum();
            self.nodes[index].value = own + children;
        }
        self
    }

    /// Stable sort of every node's children.
    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&HierarchyNode<T>, &HierarchyNode<T>) -> Ordering,
    {
        for index in self.pre_order() {
            let mut children = std::mem::take(&mut self.nodes[index].children);
            children.sort_by(|&a, &b| compare(&self.nodes[a], &self.nodes[b]));
            self.nodes[index].children = children;
        }
        self
    }

    /// Nodes without children, in pre-order.
    pub fn leaves(&self) -> Vec<&HierarchyNode<T>> {
        self.pre_order()
            .into_iter()
            .map(|index| &self.nodes[index])
            .filter(|node| node.children.is_empty())
            .collect()
    }
}
